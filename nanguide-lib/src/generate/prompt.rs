//! Grounded prompt construction

/// Reply the assistant is told to give for places outside Nan province.
pub const APOLOGY: &str = "ขออภัย สถานนั้นไม่มีข้อมูลอยู่";

/// Instruction restricting answers to the supplied documents.
pub const SCOPE_RULE: &str = "ให้ตอบเฉพาะข้อมูลที่อยู่ในเอกสารเท่านั้น";

/// System instruction sent with every question.
pub const SYSTEM_PROMPT: &str = "คุณคือ AI chatbot ผู้ช่วยแนะนำสถานที่ท่องเที่ยว\n\
ให้ตอบเฉพาะข้อมูลที่อยู่ในเอกสารเท่านั้น\n\
หากผู้ใช้สอบถามสถานที่ที่ไม่อยู่ในจังหวัดน่าน ให้ตอบว่า\n\
'ขออภัย สถานนั้นไม่มีข้อมูลอยู่'";

const CONTEXT_HEADING: &str = "ข้อมูลอ้างอิง:";
const QUESTION_LABEL: &str = "คำถาม:";
const ANSWER_CUE: &str = "คำตอบ:";

/// Join retrieved documents into one block, one per line, in rank order.
#[must_use]
pub fn context_block<T: AsRef<str>>(documents: &[T]) -> String {
    documents
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full user message: instruction, context, question and answer cue.
#[must_use]
pub fn build_prompt<T: AsRef<str>>(documents: &[T], query: &str) -> String {
    let context = context_block(documents);
    format!("{SYSTEM_PROMPT}\n\n{CONTEXT_HEADING}\n{context}\n\n{QUESTION_LABEL} {query}\n\n{ANSWER_CUE}")
}

//! The travel-guide documents answered from
//!
//! [`NAN_GUIDE`] is the built-in set: eight short Thai descriptions of places
//! to visit in Nan province. Ids are assigned by position when the set is
//! loaded, so the order here is the id order.
//!
//! A different set can be read from a plain text file with
//! [`parse_documents`], one document per blank-line separated block.

/// Built-in Nan province travel guide.
pub const NAN_GUIDE: [&str; 8] = [
    "อุทยานแห่งชาติดอยภูคา ที่เที่ยวน่าน อุทยานแห่งชาติดอยภูคา จ.น่าน \
     เป็นอุทยานที่มีพื้นที่ครอบคลุมหลายอำเภอ มีป่าดิบเขาอุดมสมบูรณ์ \
     เป็นแหล่งกำเนิดของต้นชมพูภูคา พืชหายากที่ออกดอกช่วงเดือนกุมภาพันธ์ \
     มีเส้นทางเดินศึกษาธรรมชาติ ลานกางเต็นท์ และอากาศเย็นสบายตลอดปี",
    "1715 อุทยานแห่งชาติดอยภูคา ที่เที่ยวน่าน จุดชมวิว 1715 \
     ตั้งอยู่ริมทางหลวงหมายเลข 1256 ที่ระดับความสูง 1,715 เมตรจากระดับน้ำทะเล \
     เป็นจุดชมทะเลหมอกและพระอาทิตย์ขึ้นที่สวยที่สุดแห่งหนึ่งของน่าน \
     ช่วงฤดูหนาวมีนักท่องเที่ยวมาถ่ายรูปกับถนนที่คดเคี้ยวไปตามสันเขา",
    "ดอยภูแว : ดอยภูแว ที่เที่ยวน่านธรรมชาติเป็นยอดเขาสูงในเขตอำเภอทุ่งช้าง \
     ยอดดอยเป็นผาหินที่มีลักษณะคล้ายแก้วหรือภูแว มองเห็นทิวเขาสลับซับซ้อน \
     เส้นทางเดินป่าผ่านป่าดิบ ลำธาร และน้ำตก \
     เหมาะกับผู้ที่ชื่นชอบการเดินป่าและธรรมชาติบนภูเขา",
    "อาหารเช้า&เฉาก๊วยนมสด :วัดพระธาตุเขาน้อย ที่เที่ยวน่านในเมือง \
     วัดพระธาตุเขาน้อยตั้งอยู่บนยอดดอยเขาน้อย มีพระพุทธมหาอุดมมงคลนันทบุรีศรีน่าน \
     เป็นจุดชมวิวเมืองน่านมุมสูงในยามเช้า \
     หลังไหว้พระแล้วแวะกินอาหารเช้าและเฉาก๊วยนมสดร้านดังในตัวเมือง",
    "บ่อเกลือสินเธาว์ : ที่เที่ยวน่าน บ่อเกลือสินเธาว์ นั้นเรียกได้ว่าเป็นบ่อเกลือบนภูเขา \
     ในอำเภอบ่อเกลือ ชาวบ้านยังต้มเกลือด้วยวิธีดั้งเดิมสืบทอดกันมาหลายร้อยปี \
     นักท่องเที่ยวสามารถชมการตักน้ำเกลือ การต้มเกลือ \
     และซื้อเกลือสินเธาว์เป็นของฝาก",
    "โรงเรียนชาวนาตำบลศิลาเพชร (Farmer School): ที่เที่ยวน่าน ฟาร์มสเตย์ \
     ในอำเภอปัว ท่ามกลางทุ่งนาขั้นบันไดสีเขียว \
     มีกิจกรรมเรียนรู้วิถีชาวนา ดำนา เกี่ยวข้าว \
     และร้านกาแฟกลางทุ่งนาที่มองเห็นวิวภูเขา",
    "วัดปรางค์ : ที่เที่ยวน่าน วัดปรางค์ พลาดไม่ได้ หากมาอำเภอปัว \
     วัดเก่าแก่ศิลปะไทลื้อ มีวิหารทรงล้านนาหลังคาซ้อนชั้น \
     ภายในมีจิตรกรรมฝาผนังและพระประธานที่ชาวบ้านเคารพนับถือ \
     บรรยากาศเงียบสงบเหมาะแก่การไหว้พระและถ่ายรูป",
    "วัดภูมินทร์ :ที่เที่ยวน่าน วัดภูมินทร์ เป็นวัดอารามหลวงใจกลางเมืองน่าน \
     มีพระอุโบสถจัตุรมุขและพระประธานจตุรพักตร์หันไปสี่ทิศ \
     ภายในมีภาพจิตรกรรมฝาผนังปู่ม่านย่าม่าน หรือภาพกระซิบรักบันลือโลก \
     ซึ่งเป็นสัญลักษณ์ของจังหวัดน่าน",
];

/// The built-in guide as owned strings, in id order.
#[must_use]
pub fn nan_guide() -> Vec<String> {
    NAN_GUIDE.iter().map(|doc| (*doc).to_string()).collect()
}

/// Split a document file into documents at blank lines.
///
/// Lines inside a block are joined with a single space. Blocks that are empty
/// after trimming are dropped.
#[must_use]
pub fn parse_documents(content: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut block, &mut documents);
        } else {
            block.push(line);
        }
    }
    flush(&mut block, &mut documents);

    documents
}

fn flush(block: &mut Vec<&str>, documents: &mut Vec<String>) {
    if !block.is_empty() {
        documents.push(block.join(" "));
        block.clear();
    }
}

//! Literal fragments of the backup format
//!
//! Everything here is copied into the output verbatim, so quoting and spacing
//! must not change.

pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>"#;
pub const CLOSE_TAG_SMSES: &str = "</smses>";

pub const OPEN_TAG_SMS: &str = " <sms ";
pub const CLOSE_EMPTY_TAG: &str = "/>";

pub const OPEN_ATTRIBUTE: &str = "=\"";
pub const CLOSE_ATTRIBUTE: &str = "\" ";

/// Placeholder written for absent values and unused attributes
pub const NULL: &str = "null";

pub fn created_by(generator: &str) -> String {
    format!("<!-- File Created By {} -->", generator)
}

pub fn open_tag_smses(count: usize) -> String {
    format!(r#"<smses count="{}">"#, count)
}

// <mms> attributes, split around the `date` and `address` values.
pub const MMS_OPEN: &str = r#"<mms text_only="0" sub="null" retr_st="null" "#;
pub const MMS_AFTER_DATE: &str =
    r#"ct_cls="null" sub_cs="null" read="1" ct_l="null" tr_id="null" st="null" msg_box="1" "#;
pub const MMS_AFTER_ADDRESS: &str = concat!(
    r#"m_cls="personal" d_tm="null" read_status="null" ct_t="application/vnd.wap.multipart.related" "#,
    r#"retr_txt_cs="null" d_rpt="129" m_id="null" date_sent="0" seen="0" m_type="132" v="18" "#,
    r#"exp="null" pri="129" rr="129" resp_txt="null" rpt_a="null" locked="0" retr_txt="null" "#,
    r#"resp_st="null" m_size="null" readable_date="null" contact_name="null""#,
    ">\n",
);
pub const MMS_CLOSE: &str = "</mms>";

pub const PART_CLOSE: &str = "/>\n";

/// Text part, followed by its `text` attribute
pub const TEXT_PART_OPEN: &str = r#"<part seq="0" ct="text/plain" name="Text_0.txt" chset="106" cd="null" fn="null" cid="&lt;313&gt;" cl="Text_0.txt" ctt_s="null" ctt_t="null" "#;

/// Attachment part, followed by its `ct` attribute
pub const ATTACHMENT_PART_OPEN: &str = r#"<part seq="0" "#;
/// Attachment part attributes between `ct` and `data`
pub const ATTACHMENT_PART_ATTRS: &str = r#"name="test.jpeg" chset="null" cd="null" fn="null" cid="&lt;312&gt;" cl="test.jpeg" ctt_s="null" ctt_t="null" text="null" "#;

/// Image-over-text slide layout referencing the parts with cid 312 and 313
pub const SMIL_PART: &str = concat!(
    r##"<part seq="-1" ct="application/smil" name="Smil.txt" chset="106" cd="null" fn="null" cid="&lt;0000&gt;" cl="Smil.txt" ctt_s="null" ctt_t="null" "##,
    r##"text='&lt;smil&gt;&#13;&#10;  &lt;head&gt;&#13;&#10;    &lt;layout&gt;&#13;&#10;"##,
    r##"      &lt;region fit="scroll" height="50%" id="Text" left="0" top="50%" width="100%"/&gt;&#13;&#10;"##,
    r##"      &lt;region fit="meet" height="50%" id="Image" left="0" top="0" width="100%"/&gt;&#13;&#10;"##,
    r##"    &lt;/layout&gt;&#13;&#10;  &lt;/head&gt;&#13;&#10;  &lt;body&gt;&#13;&#10;"##,
    r##"    &lt;par dur="5000ms"&gt;&#13;&#10;      &lt;img region="Image" src="cid:312"/&gt;&#13;&#10;"##,
    r##"      &lt;text region="Text" src="cid:313"/&gt;&#13;&#10;    &lt;/par&gt;&#13;&#10;"##,
    r##"  &lt;/body&gt;&#13;&#10;&lt;/smil&gt;&#13;&#10;' />"##,
    "\n",
);

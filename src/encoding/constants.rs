/// Int32 tag, 0x00
pub(crate) const TAG_I32: u8 = 0x00;
/// UInt32 tag, 0x01
pub(crate) const TAG_U32: u8 = 0x01;
/// Boolean tag, 0x02
pub(crate) const TAG_BOOL: u8 = 0x02;
/// Float tag, 0x03
pub(crate) const TAG_FLOAT: u8 = 0x03;
/// String tag, 0x04
pub(crate) const TAG_STR: u8 = 0x04;
/// Struct open tag, 0x05
pub(crate) const TAG_STRUCT: u8 = 0x05;
/// Struct close tag, 0x06
pub(crate) const TAG_STRUCT_END: u8 = 0x06;

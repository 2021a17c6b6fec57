/// 字节数格式化
pub mod human_size;

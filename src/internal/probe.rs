/// 探测相关函数
pub mod functions;
/// 探测结果模型
pub mod structs;

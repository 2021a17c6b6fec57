/// 协调器内部流程函数
pub mod functions;
/// 下载器入口、句柄与错误
pub mod structs;

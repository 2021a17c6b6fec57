/// 抓取协议常量
pub mod constants;
/// 工作者流程函数
pub mod functions;
/// 工作者与进度门限
pub mod structs;

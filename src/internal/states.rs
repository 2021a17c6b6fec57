//! 状态基元：跨任务共享进度与传递消息的两种通道。
//!
//! - [`watched_value`]：广播最新值，监听端允许丢中间值，适合进度；
//! - [`message_queue`]：多生产者单消费者 FIFO，适合工作者消息。

pub mod message_queue;
pub mod watched_value;

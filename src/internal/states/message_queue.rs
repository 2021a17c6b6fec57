//! # MessageQueue —— 工作者消息队列
//!
//! 基于 [`tokio::sync::mpsc`] 无界通道的单向消息通道：多个生产者
//! （各分段工作者）、单一消费者（协调器事件循环）。
//!
//! 同一生产者的消息严格保序；不同生产者之间不保证相对顺序。
//! 所有生产者销毁后，消费端取尽剩余消息即收到关闭信号。

use tokio::sync::mpsc;

/// 生产者端；可 Clone 分发给多个工作者，发送无锁、立即返回。
#[derive(Debug, Clone)]
pub(crate) struct MessageQueue<T: Send + 'static> {
    sender: mpsc::UnboundedSender<T>,
}

/// 消费者端；独占接收，按 FIFO 顺序消费。
#[derive(Debug)]
pub(crate) struct MessageQueueConsumer<T: Send + 'static> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> MessageQueue<T> {
    /// 创建 (生产者, 消费者) 对。
    pub(crate) fn new() -> (Self, MessageQueueConsumer<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, MessageQueueConsumer { receiver })
    }

    /// 入队；消费端已销毁时返回 `Err(原值)`。
    pub(crate) fn send(&self, value: T) -> Result<(), T> {
        self.sender.send(value).map_err(|e| e.0)
    }
}

impl<T: Send + 'static> MessageQueueConsumer<T> {
    /// 取下一条消息；队列空则挂起，所有生产者销毁后返回 `None`。
    pub(crate) async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}

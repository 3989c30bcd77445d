/*!
 * 事件模块
 *
 * 提供监听器集合、订阅句柄和进程内信号总线。
 */

pub mod listeners;
pub mod signal_bus;

pub use listeners::{ListenerSet, Subscription};
pub use signal_bus::{names, Signal, SignalBus, SignalHandler, DEFAULT_SIGNAL_CAPACITY};

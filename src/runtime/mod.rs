//! Runtime: 启动装配、关闭信号与各运行模式

pub mod lifetime;
pub mod modes;

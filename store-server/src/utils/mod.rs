//! 工具模块 - 日志与输入校验
//!
//! 错误类型与响应结构统一放在 `shared::error`，这里只留
//! 服务端本地的基础设施。

pub mod logger;
pub mod validation;

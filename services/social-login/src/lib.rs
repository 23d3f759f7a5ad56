//! Social Login Service Library
//!
//! 分层结构：
//! - `domain`: 会话令牌与用户实体、仓储接口
//! - `application`: 授权码交换、令牌转换、用户解析以及串联三者的登录流程
//! - `infrastructure`: PostgreSQL 仓储实现
//! - `api`: HTTP 接口

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

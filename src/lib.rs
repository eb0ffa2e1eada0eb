//! Rust LMS Next - 课程管理平台后端服务
//!
//! 基于 Actix Web 与 SeaORM 构建的学习管理系统后端。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `media`: 课程缩略图的本地存储与规范化
//! - `middlewares`: 课程加载中间件
//! - `models`: 数据模型定义
//! - `routes`: 路由表与 API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod media;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

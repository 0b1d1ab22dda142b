//! Built-in content detectors.
//!
//! Priorities fix the check order (json, xml, sql, html, markdown, url,
//! email, code). Order only matters for ties: the earlier detector wins on
//! equal confidence.

pub mod code;
pub mod html;
pub mod json;
pub mod links;
pub mod markdown;
pub mod sql;
pub mod xml;

pub const JSON_PRIORITY: i32 = 80;
pub const XML_PRIORITY: i32 = 70;
pub const SQL_PRIORITY: i32 = 60;
pub const HTML_PRIORITY: i32 = 50;
pub const MARKDOWN_PRIORITY: i32 = 40;
pub const URL_PRIORITY: i32 = 30;
pub const EMAIL_PRIORITY: i32 = 20;
pub const CODE_PRIORITY: i32 = 10;

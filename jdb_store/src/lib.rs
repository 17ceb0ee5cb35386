#![cfg_attr(docsrs, feature(doc_cfg))]

//! # jdb_store - Segment record store
//! 段记录存储
//!
//! Append-only store of length-prefixed records for one commit log segment.
//! Records are addressed by the byte position returned from `append`; the
//! caller keeps the mapping from logical offsets to positions.
//! 单个提交日志段的追加式长度前缀记录存储。
//! 记录通过 `append` 返回的字节位置寻址；逻辑偏移到位置的映射由调用方维护。
//!
//! ## Layout / 布局
//!
//! ```text
//! [len: u64 big-endian][payload: len bytes][len][payload]...
//! ```
//!
//! No file header, no padding, no checksum.
//! 无文件头、无填充、无校验和。

pub mod conf;
pub mod consts;
pub mod error;
pub mod file;
pub mod head;
pub mod reader;
pub mod store;

pub use conf::Conf;
pub use consts::LEN_WIDTH;
pub use error::{Error, Result};
pub use file::StoreFile;
pub use head::Head;
pub use reader::StoreReader;
pub use store::Store;

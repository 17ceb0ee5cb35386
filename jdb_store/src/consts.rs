//! 常量定义 Constants

/// Length prefix width in bytes / 长度前缀字节数
pub const LEN_WIDTH: usize = 8;

/// Default write buffer capacity / 默认写缓冲容量
pub const BUF_CAP: usize = 4096;

//! Error types for jdb_store
//! jdb_store 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  /// A previous append failed part way, tail may hold a torn frame
  /// 之前的追加中途失败，尾部可能有残缺帧
  #[error("store poisoned by failed append / 追加失败，存储已中毒")]
  Poisoned,

  #[error("store closed / 存储已关闭")]
  Closed,
}

impl Error {
  /// Underlying io error kind, if any / 底层 io 错误类型
  #[inline]
  pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
    match self {
      Self::Io(e) => Some(e.kind()),
      _ => None,
    }
  }
}

impl From<Error> for std::io::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Io(e) => e,
      e => std::io::Error::other(e),
    }
  }
}

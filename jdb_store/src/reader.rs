//! Sequential reader over store bytes
//! 存储字节的顺序读取器
//!
//! Streams the raw frame stream, e.g. to ship a whole segment to a replica.
//! 输出原始帧流，例如把整个段发送给副本。

use std::io::{self, Read};

use crate::{file::StoreFile, store::Store};

pub struct StoreReader<'a, F: StoreFile> {
  store: &'a Store<F>,
  offset: u64,
}

impl<'a, F: StoreFile> StoreReader<'a, F> {
  #[inline]
  pub(crate) fn new(store: &'a Store<F>) -> Self {
    Self { store, offset: 0 }
  }

  /// Next offset to read / 下一个读取偏移
  #[inline]
  pub fn offset(&self) -> u64 {
    self.offset
  }
}

impl<F: StoreFile> Read for StoreReader<'_, F> {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = self.store.read_at(buf, self.offset)?;
    self.offset += n as u64;
    Ok(n)
  }
}

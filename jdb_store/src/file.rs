//! Backing file seam / 底层文件接口

use std::{
  fs::File,
  io::{self, ErrorKind, Seek, Write},
};

/// File resource a store writes through and reads from
/// 存储写入和读取所用的文件资源
///
/// Writes go through the cursor, reads are positional and must not disturb
/// the cursor.
/// 写入经由游标，读取为定位读，不得改变游标。
pub trait StoreFile: Write + Seek {
  /// Current physical length (stat) / 当前物理长度（stat）
  fn stat_len(&self) -> io::Result<u64>;

  /// Positional read, may return fewer bytes than asked
  /// 定位读，可能少于请求字节数
  fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

  fn sync_data(&self) -> io::Result<()>;
}

impl StoreFile for File {
  #[inline]
  fn stat_len(&self) -> io::Result<u64> {
    Ok(self.metadata()?.len())
  }

  #[cfg(unix)]
  #[inline]
  fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(self, buf, offset)
  }

  #[cfg(windows)]
  fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    // seek_read moves the cursor, put it back for the next append
    // seek_read 会移动游标，为下次追加恢复
    let mut f = self;
    let cur = f.stream_position()?;
    let res = std::os::windows::fs::FileExt::seek_read(self, buf, offset);
    f.seek(io::SeekFrom::Start(cur))?;
    res
  }

  #[inline]
  fn sync_data(&self) -> io::Result<()> {
    File::sync_data(self)
  }
}

/// Read until buf is full or EOF, return bytes read
/// 读到 buf 填满或 EOF，返回读取字节数
pub(crate) fn read_full_at<F: StoreFile>(f: &F, buf: &mut [u8], offset: u64) -> io::Result<usize> {
  let mut n = 0;
  while n < buf.len() {
    match f.read_at(&mut buf[n..], offset + n as u64) {
      Ok(0) => break,
      Ok(got) => n += got,
      Err(e) if e.kind() == ErrorKind::Interrupted => {}
      Err(e) => return Err(e),
    }
  }
  Ok(n)
}

pub(crate) fn read_exact_at<F: StoreFile>(f: &F, buf: &mut [u8], offset: u64) -> io::Result<()> {
  if read_full_at(f, buf, offset)? < buf.len() {
    return Err(ErrorKind::UnexpectedEof.into());
  }
  Ok(())
}

//! Append-only record store
//! 追加式记录存储
//!
//! One coarse lock covers every operation. Appends only buffer; read, read_at,
//! flush and close push the buffer to the file; sync and close with
//! `Conf::SyncOnClose(true)` also reach the disk.
//! 单把粗粒度锁覆盖所有操作。追加只写缓冲；read、read_at、flush、close
//! 把缓冲写入文件；sync 以及开启 `Conf::SyncOnClose(true)` 的 close 才落盘。

use std::{
  fs::File,
  io::{self, BufWriter, ErrorKind, SeekFrom, Write},
};

use log::{debug, error, warn};
use parking_lot::Mutex;
use zerocopy::IntoBytes;

use crate::{
  Conf,
  consts::{BUF_CAP, LEN_WIDTH},
  error::{Error, Result},
  file::{StoreFile, read_exact_at, read_full_at},
  head::Head,
  reader::StoreReader,
};

/// Record store over one segment file
/// 单个段文件上的记录存储
pub struct Store<F: StoreFile = File> {
  inner: Mutex<Inner<F>>,
  sync_on_close: bool,
}

struct Inner<F: StoreFile> {
  /// None after close / 关闭后为 None
  buf: Option<BufWriter<F>>,
  /// Flushed + buffered bytes / 已刷盘 + 缓冲中的字节数
  size: u64,
  poisoned: bool,
}

impl<F: StoreFile> Inner<F> {
  #[inline]
  fn buf(&mut self) -> Result<&mut BufWriter<F>> {
    self.buf.as_mut().ok_or(Error::Closed)
  }

  /// Flush buffer, return file for positional reads
  /// 刷新缓冲，返回文件用于定位读
  #[inline]
  fn flushed(&mut self) -> Result<&F> {
    let buf = self.buf()?;
    buf.flush()?;
    Ok(buf.get_ref())
  }
}

impl<F: StoreFile> Store<F> {
  /// Wrap an already open file, size taken from stat
  /// 包装已打开的文件，大小取自 stat
  ///
  /// The cursor is moved to the end so appends continue after existing frames.
  /// 游标移到末尾，追加接在已有帧之后。
  pub fn new(mut file: F, conf: &[Conf]) -> Result<Self> {
    let mut cap = BUF_CAP;
    let mut sync_on_close = false;
    for c in conf {
      match c {
        Conf::BufCap(n) => cap = *n,
        Conf::SyncOnClose(b) => sync_on_close = *b,
      }
    }

    let size = file.stat_len()?;
    file.seek(SeekFrom::Start(size))?;
    debug!("store opened: size={size}, buf_cap={cap}");

    Ok(Self {
      inner: Mutex::new(Inner {
        buf: Some(BufWriter::with_capacity(cap, file)),
        size,
        poisoned: false,
      }),
      sync_on_close,
    })
  }

  /// Append one record, return (bytes written, position)
  /// 追加一条记录，返回 (写入字节数, 位置)
  ///
  /// `size` only moves when both the prefix and the payload were accepted. A
  /// failure in between may leave a torn frame, so the store is poisoned and
  /// refuses further appends.
  /// 前缀和负载都写入成功才推进 `size`。中途失败可能留下残缺帧，
  /// 存储因此被标记为中毒并拒绝后续追加。
  pub fn append(&self, data: &[u8]) -> Result<(u64, u64)> {
    let mut guard = self.inner.lock();
    let inner = &mut *guard;
    let buf = inner.buf.as_mut().ok_or(Error::Closed)?;
    if inner.poisoned {
      return Err(Error::Poisoned);
    }

    let pos = inner.size;
    let head = Head::new(data.len() as u64);
    if let Err(e) = buf
      .write_all(head.as_bytes())
      .and_then(|_| buf.write_all(data))
    {
      inner.poisoned = true;
      warn!("store poisoned: append at {pos} failed: {e}");
      return Err(e.into());
    }

    let written = head.frame_len();
    inner.size += written;
    Ok((written, pos))
  }

  /// Read the record whose prefix starts at pos
  /// 读取前缀起始于 pos 的记录
  pub fn read(&self, pos: u64) -> Result<Vec<u8>> {
    let mut inner = self.inner.lock();
    let size = inner.size;
    let file = inner.flushed()?;

    let mut prefix = [0u8; LEN_WIDTH];
    read_exact_at(file, &mut prefix, pos)?;
    let head = Head::decode(&prefix).ok_or(io::Error::from(ErrorKind::UnexpectedEof))?;

    // Refuse before allocating for a length that runs past the end
    // 长度越过末尾时在分配前拒绝
    let body = pos + LEN_WIDTH as u64;
    if body.checked_add(head.payload_len()).is_none_or(|end| end > size) {
      return Err(io::Error::from(ErrorKind::UnexpectedEof).into());
    }

    let mut data = vec![0u8; head.payload_len() as usize];
    read_exact_at(file, &mut data, body)?;
    Ok(data)
  }

  /// Raw positional read, fills buf until full or EOF
  /// 原始定位读，填满 buf 或到 EOF 为止
  ///
  /// Returns bytes read; less than `buf.len()` means EOF was hit.
  /// 返回读取字节数；小于 `buf.len()` 表示已到 EOF。
  pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
    let mut inner = self.inner.lock();
    let file = inner.flushed()?;
    Ok(read_full_at(file, buf, offset)?)
  }

  /// Logical size, flushed + buffered / 逻辑大小（已刷盘 + 缓冲）
  pub fn size(&self) -> u64 {
    self.inner.lock().size
  }

  /// Push buffered bytes to the file, no fsync
  /// 把缓冲写入文件，不 fsync
  pub fn flush(&self) -> Result<()> {
    self.inner.lock().flushed()?;
    Ok(())
  }

  /// Flush and sync_data / 刷新并 sync_data
  pub fn sync(&self) -> Result<()> {
    let mut inner = self.inner.lock();
    inner.flushed()?.sync_data()?;
    Ok(())
  }

  /// Flush and release the file, single use
  /// 刷新并释放文件，仅调用一次
  ///
  /// On a flush or sync error the file stays open and the error is returned.
  /// 刷新或同步出错时文件保持打开并返回错误。
  pub fn close(&self) -> Result<()> {
    let mut inner = self.inner.lock();
    let file = inner.flushed()?;
    if self.sync_on_close {
      file.sync_data()?;
    }
    if let Some(buf) = inner.buf.take() {
      let (file, _) = buf.into_parts();
      drop(file);
    }
    debug!("store closed: size={}", inner.size);
    Ok(())
  }

  /// Sequential reader over raw bytes from offset 0
  /// 从偏移 0 开始的原始字节顺序读取器
  pub fn reader(&self) -> StoreReader<'_, F> {
    StoreReader::new(self)
  }
}

impl<F: StoreFile> Drop for Store<F> {
  fn drop(&mut self) {
    let inner = self.inner.get_mut();
    if let Some(mut buf) = inner.buf.take() {
      if let Err(e) = buf.flush() {
        error!("store drop: flush failed at size {}: {e}", inner.size);
      }
      let _ = buf.into_parts();
    }
  }
}

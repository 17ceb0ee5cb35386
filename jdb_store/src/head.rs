//! Frame length prefix / 帧长度前缀
//!
//! Big-endian on disk so segment files stay portable across hosts.
//! 磁盘上使用大端序，段文件可跨主机移植。

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, byteorder::big_endian::U64};

use crate::consts::LEN_WIDTH;

/// Length prefix of one frame / 单帧长度前缀
#[repr(C)]
#[derive(
  Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Eq,
)]
pub struct Head {
  pub len: U64,
}

const _: () = assert!(size_of::<Head>() == LEN_WIDTH);

impl Head {
  #[inline(always)]
  pub fn new(len: u64) -> Self {
    Self { len: U64::new(len) }
  }

  /// Payload length / 负载长度
  #[inline(always)]
  pub fn payload_len(&self) -> u64 {
    self.len.get()
  }

  /// Whole frame length, prefix included / 整帧长度（含前缀）
  #[inline(always)]
  pub fn frame_len(&self) -> u64 {
    LEN_WIDTH as u64 + self.len.get()
  }

  /// Decode from the first LEN_WIDTH bytes / 从前 LEN_WIDTH 字节解码
  #[inline]
  pub fn decode(buf: &[u8]) -> Option<Self> {
    Self::read_from_prefix(buf).ok().map(|(head, _)| head)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn big_endian_layout() {
    let head = Head::new(0x0102_0304_0506_0708);
    assert_eq!(head.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(head.frame_len(), 0x0102_0304_0506_0708 + 8);
  }

  #[test]
  fn decode_prefix() {
    let buf = [0, 0, 0, 0, 0, 0, 0, 5, b'h', b'e'];
    assert_eq!(Head::decode(&buf).map(|h| h.payload_len()), Some(5));
    assert!(Head::decode(&buf[..7]).is_none());
  }

  #[test]
  fn empty_payload() {
    let head = Head::new(0);
    assert_eq!(head.as_bytes(), &[0u8; LEN_WIDTH]);
    assert_eq!(head.frame_len(), LEN_WIDTH as u64);
  }
}

/// Store configuration
/// 存储配置
#[derive(Clone, Copy, Debug)]
pub enum Conf {
  /// Write buffer capacity in bytes
  /// 写缓冲容量（字节）
  BufCap(usize),
  /// Call sync_data before releasing the file on close
  /// 关闭时释放文件前调用 sync_data
  SyncOnClose(bool),
}

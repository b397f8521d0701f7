//! UDPデータグラムのエンコード・デコード
//!
//! バイト列からヘッダーとペイロードを取り出し、値からワイヤ形式のバイト列を組み立てる。
//! チェックサムは IPv4 / IPv6 の疑似ヘッダーを含めて計算する。

pub mod core;
pub mod network;
pub mod setup_logger;

pub use crate::core::{CodecConfig, CodecError, CodecResult, Configuration};
pub use crate::network::{BuildMode, Payload, UdpHeader, UdpPacket, UdpPacketBuilder, UDP_HEADER_SIZE};

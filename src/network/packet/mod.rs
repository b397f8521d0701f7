pub mod udp;

use crate::network::hex::to_hex_string;
use bytes::Bytes;
use std::fmt;

pub use udp::{BuildMode, UdpHeader, UdpPacket, UdpPacketBuilder, UDP_HEADER_SIZE};

/// パケットのペイロード
///
/// 解析できないデータはそのままのバイト列として、
/// 上位のパケットとして組み立てたものは `Udp` として保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Raw(Bytes),
    Udp(Box<UdpPacket>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Raw(data) => data.len(),
            Payload::Udp(packet) => packet.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn raw_data(&self) -> Bytes {
        match self {
            Payload::Raw(data) => data.clone(),
            Payload::Udp(packet) => Bytes::from(packet.to_bytes()),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Payload::Raw(_) => true,
            // アドレスが分からないのでチェックサムは確認できない
            Payload::Udp(packet) => packet.is_well_formed(),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(data: Vec<u8>) -> Self {
        Payload::Raw(Bytes::from(data))
    }
}

impl From<&[u8]> for Payload {
    fn from(data: &[u8]) -> Self {
        Payload::Raw(Bytes::copy_from_slice(data))
    }
}

impl From<UdpPacket> for Payload {
    fn from(packet: UdpPacket) -> Self {
        Payload::Udp(Box::new(packet))
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Raw(data) => {
                writeln!(f, "[data ({} bytes)]", data.len())?;
                writeln!(f, "  Hex stream: {}", to_hex_string(data, " "))
            }
            Payload::Udp(packet) => write!(f, "{}", packet),
        }
    }
}

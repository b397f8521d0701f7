use crate::core::{CodecConfig, CodecError, CodecResult};
use crate::network::checksum::{internet_checksum, pseudo_header};
use crate::network::hex::to_hex_string;
use crate::network::ip_number::IpNumber;
use crate::network::packet::Payload;
use bytes::{Buf, BufMut, BytesMut};
use log::{debug, trace};
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

// RFC 768 User Datagram Protocol
//  0      7 8     15 16    23 24    31
// +--------+--------+--------+--------+
// |     Source      |   Destination   |
// |      Port       |      Port       |
// +--------+--------+--------+--------+
// |                 |                 |
// |     Length      |    Checksum     |
// +--------+--------+--------+--------+
// |
// |          data octets ...
// +---------------- ...
pub const UDP_HEADER_SIZE: usize = 8;
const CHECKSUM_OFFSET: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UdpHeader {
    source_port: u16,
    destination_port: u16,
    length: u16,
    checksum: u16,
}

impl UdpHeader {
    /// 先頭8バイトをヘッダーとして読み取り、残りをペイロードとして返す
    ///
    /// 長さとチェックサムの正しさはアドレスに依存するため、ここでは確認しない。
    pub fn parse(data: &[u8]) -> CodecResult<(Self, &[u8])> {
        if data.len() < UDP_HEADER_SIZE {
            return Err(CodecError::MalformedInput {
                required: UDP_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let (mut header, rest) = data.split_at(UDP_HEADER_SIZE);
        let source_port = header.get_u16();
        let destination_port = header.get_u16();
        let length = header.get_u16();
        let checksum = header.get_u16();

        Ok((
            Self {
                source_port,
                destination_port,
                length,
                checksum,
            },
            rest,
        ))
    }

    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    pub fn destination_port(&self) -> u16 {
        self.destination_port
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    pub fn header_len(&self) -> usize {
        UDP_HEADER_SIZE
    }

    pub fn to_bytes(&self) -> [u8; UDP_HEADER_SIZE] {
        let mut raw = [0u8; UDP_HEADER_SIZE];
        let mut buffer = &mut raw[..];
        buffer.put_u16(self.source_port);
        buffer.put_u16(self.destination_port);
        buffer.put_u16(self.length);
        buffer.put_u16(self.checksum);
        raw
    }

    /// 疑似ヘッダー込みのチェックサムを計算する
    ///
    /// 疑似ヘッダーの長さには宣言された長さではなく実際の長さ (8 + ペイロード) を使う。
    /// 計算結果が0の場合は0xFFFFとして返す (0は「チェックサムなし」を意味するため)。
    pub fn compute_checksum(
        &self,
        payload: &[u8],
        source: IpAddr,
        destination: IpAddr,
    ) -> CodecResult<u16> {
        let udp_length = UDP_HEADER_SIZE + payload.len();
        let pseudo = pseudo_header(source, destination, IpNumber::Udp, udp_length)?;
        let padded_length = udp_length + udp_length % 2;

        let mut data = BytesMut::with_capacity(padded_length + pseudo.len());
        data.put_slice(&self.to_bytes());
        // チェックサムフィールドは0として計算する
        data[CHECKSUM_OFFSET..UDP_HEADER_SIZE].fill(0);
        data.put_slice(payload);
        if udp_length % 2 != 0 {
            data.put_u8(0);
        }
        data.put_slice(&pseudo);

        trace!(
            "チェックサム計算: UDP長={} パディング後={} 疑似ヘッダー={}",
            udp_length,
            padded_length,
            pseudo.len()
        );

        let checksum = internet_checksum(&data);
        Ok(if checksum == 0 { 0xFFFF } else { checksum })
    }

    /// 長さが一致し、かつチェックサムが0 (未計算) か再計算結果と一致すれば有効
    pub fn is_valid(
        &self,
        payload: &[u8],
        source: IpAddr,
        destination: IpAddr,
        config: &CodecConfig,
    ) -> CodecResult<bool> {
        if !config.verify_checksum {
            return Ok(true);
        }

        let actual_length = UDP_HEADER_SIZE + payload.len();
        if self.length as usize != actual_length {
            debug!(
                "UDP長が一致しません: 宣言={} 実際={}",
                self.length, actual_length
            );
            return Ok(false);
        }

        if self.checksum == 0 {
            return Ok(true);
        }

        let expected = self.compute_checksum(payload, source, destination)?;
        if expected != self.checksum {
            debug!(
                "UDPチェックサムが一致しません: 格納値=0x{:04x} 計算値=0x{:04x}",
                self.checksum, expected
            );
            return Ok(false);
        }

        Ok(true)
    }
}

impl fmt::Display for UdpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[UDP Header ({} bytes)]", self.header_len())?;
        writeln!(f, "  Source port: {}", self.source_port)?;
        writeln!(f, "  Destination port: {}", self.destination_port)?;
        writeln!(f, "  Length: {} [bytes]", self.length)?;
        writeln!(f, "  Checksum: 0x{}", to_hex_string(&self.checksum.to_be_bytes(), ""))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpPacket {
    header: UdpHeader,
    payload: Payload,
}

impl UdpPacket {
    pub fn parse(data: &[u8]) -> CodecResult<Self> {
        let (header, rest) = UdpHeader::parse(data)?;

        Ok(Self {
            header,
            payload: Payload::from(rest),
        })
    }

    pub fn builder() -> UdpPacketBuilder {
        UdpPacketBuilder::default()
    }

    /// このパケットの値を引き継いだビルダーを返す
    pub fn to_builder(&self) -> UdpPacketBuilder {
        UdpPacketBuilder::from(self)
    }

    pub fn header(&self) -> &UdpHeader {
        &self.header
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn len(&self) -> usize {
        UDP_HEADER_SIZE + self.payload.len()
    }

    // ヘッダーがあるので常にfalse
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.len());
        buffer.extend_from_slice(&self.header.to_bytes());
        buffer.extend_from_slice(&self.payload.raw_data());
        buffer
    }

    pub fn is_valid(
        &self,
        source: IpAddr,
        destination: IpAddr,
        config: &CodecConfig,
    ) -> CodecResult<bool> {
        if !self.payload.is_valid() {
            debug!("ペイロードが不正です");
            return Ok(false);
        }

        self.header
            .is_valid(&self.payload.raw_data(), source, destination, config)
    }

    // アドレスなしで確認できる範囲の整合性
    pub(crate) fn is_well_formed(&self) -> bool {
        self.payload.is_valid() && self.header.length as usize == self.len()
    }
}

impl fmt::Display for UdpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        write!(f, "{}", self.payload)
    }
}

/// 長さとチェックサムを計算するか、指定値をそのまま使うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Auto,
    /// 不正なパケットの作成やキャプチャ値の再現に使う
    Explicit,
}

/// `UdpPacket` を組み立てるための値の集まり
///
/// `Auto` では `length` と `checksum` は無視され、送信元と宛先のアドレスが必須になる。
#[derive(Debug, Clone, Default)]
pub struct UdpPacketBuilder {
    pub source_port: u16,
    pub destination_port: u16,
    pub length: u16,
    pub checksum: u16,
    pub payload: Option<Payload>,
    pub source_address: Option<IpAddr>,
    pub destination_address: Option<IpAddr>,
    pub mode: BuildMode,
}

impl UdpPacketBuilder {
    pub fn build(self, config: &CodecConfig) -> CodecResult<UdpPacket> {
        let payload = self.payload.ok_or(CodecError::MissingPayload)?;

        let header = match self.mode {
            BuildMode::Explicit => UdpHeader {
                source_port: self.source_port,
                destination_port: self.destination_port,
                length: self.length,
                checksum: self.checksum,
            },
            BuildMode::Auto => {
                let source = self
                    .source_address
                    .ok_or(CodecError::MissingAddress("送信元"))?;
                let destination = self
                    .destination_address
                    .ok_or(CodecError::MissingAddress("宛先"))?;

                let total_length = UDP_HEADER_SIZE + payload.len();
                let length = u16::try_from(total_length)
                    .map_err(|_| CodecError::PayloadTooLarge(total_length))?;

                let header = UdpHeader {
                    source_port: self.source_port,
                    destination_port: self.destination_port,
                    length,
                    checksum: 0,
                };

                if config.generate_checksum {
                    let checksum =
                        header.compute_checksum(&payload.raw_data(), source, destination)?;
                    UdpHeader { checksum, ..header }
                } else {
                    header
                }
            }
        };

        debug!(
            "UDPパケットを構築しました: {} -> {} 長さ={} チェックサム=0x{:04x} ({:?})",
            header.source_port, header.destination_port, header.length, header.checksum, self.mode
        );

        Ok(UdpPacket { header, payload })
    }
}

impl From<&UdpPacket> for UdpPacketBuilder {
    fn from(packet: &UdpPacket) -> Self {
        Self {
            source_port: packet.header.source_port,
            destination_port: packet.header.destination_port,
            length: packet.header.length,
            checksum: packet.header.checksum,
            payload: Some(packet.payload.clone()),
            ..Default::default()
        }
    }
}

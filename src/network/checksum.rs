use crate::core::{CodecError, CodecResult};
use crate::network::ip_number::IpNumber;
use bytes::{BufMut, BytesMut};
use std::net::IpAddr;

pub const IPV4_PSEUDO_HEADER_SIZE: usize = 12;
pub const IPV6_PSEUDO_HEADER_SIZE: usize = 40;

/// インターネットチェックサム (RFC 1071)
///
/// 奇数長の場合は末尾に0を1バイト補ったものとして計算する。
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum = 0u32;

    // 16ビット単位で合計を計算
    for chunk in data.chunks(2) {
        let mut word = (chunk[0] as u32) << 8;
        if chunk.len() > 1 {
            word |= chunk[1] as u32;
        }
        sum = sum.wrapping_add(word);

        // 桁あふれする前に折り返す
        if sum > 0xFFFF_0000 {
            sum = (sum & 0xFFFF) + (sum >> 16);
        }
    }

    // 上位16ビットを下位16ビットに折り返す
    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    // 1の補数を取る
    !sum as u16
}

// 0                   1                   2                   3
// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       Source Address                          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Destination Address                        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |     zero      |    Protocol   |        Upper-Layer Length     |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// IPv6 (RFC 8200 8.1) はアドレスが16バイト、長さが32ビット、
// その後に3バイトの0と次ヘッダーが続く。
pub fn pseudo_header(
    source: IpAddr,
    destination: IpAddr,
    protocol: IpNumber,
    upper_layer_length: usize,
) -> CodecResult<BytesMut> {
    match (source, destination) {
        (IpAddr::V4(src), IpAddr::V4(dst)) => {
            let length = u16::try_from(upper_layer_length)
                .map_err(|_| CodecError::PayloadTooLarge(upper_layer_length))?;

            let mut buffer = BytesMut::with_capacity(IPV4_PSEUDO_HEADER_SIZE);
            buffer.put_slice(&src.octets());
            buffer.put_slice(&dst.octets());
            buffer.put_u8(0);
            buffer.put_u8(protocol.value());
            buffer.put_u16(length);
            Ok(buffer)
        }
        (IpAddr::V6(src), IpAddr::V6(dst)) => {
            let length = u32::try_from(upper_layer_length)
                .map_err(|_| CodecError::PayloadTooLarge(upper_layer_length))?;

            let mut buffer = BytesMut::with_capacity(IPV6_PSEUDO_HEADER_SIZE);
            buffer.put_slice(&src.octets());
            buffer.put_slice(&dst.octets());
            buffer.put_u32(length);
            buffer.put_bytes(0, 3);
            buffer.put_u8(protocol.value());
            Ok(buffer)
        }
        (src, dst) => Err(CodecError::UnsupportedAddressFamily(format!(
            "送信元 {} と宛先 {} のアドレスファミリーが一致しません",
            src, dst
        ))),
    }
}

pub mod checksum;
pub mod hex;
pub mod ip_number;
pub mod packet;

pub use checksum::internet_checksum;
pub use ip_number::IpNumber;
pub use packet::{BuildMode, Payload, UdpHeader, UdpPacket, UdpPacketBuilder, UDP_HEADER_SIZE};

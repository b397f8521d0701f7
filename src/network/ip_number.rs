/// IPヘッダーのプロトコル番号 (IPv6では次ヘッダー)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpNumber {
    Udp = 17,
}

impl IpNumber {
    pub fn value(self) -> u8 {
        self as u8
    }
}

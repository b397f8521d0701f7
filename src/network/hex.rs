use crate::core::{CodecError, CodecResult};

pub fn to_hex_string(data: &[u8], separator: &str) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(separator)
}

/// 16進数文字列をバイト列に変換する
///
/// 空白と `:` は区切りとして無視し、先頭の `0x` は取り除く。
pub fn parse_hex(input: &str) -> CodecResult<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<char> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CodecError::InvalidHex(format!("桁数が奇数です: {}", digits.len())));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let s: String = pair.iter().collect();
            u8::from_str_radix(&s, 16)
                .map_err(|e| CodecError::InvalidHex(format!("{}: {}", s, e)))
        })
        .collect()
}

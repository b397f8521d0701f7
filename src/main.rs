use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::net::IpAddr;
use udp_codec::core::{CodecConfig, CodecError, CodecResult, Configuration, InitProcessError};
use udp_codec::network::hex::{parse_hex, to_hex_string};
use udp_codec::setup_logger::setup_logger;
use udp_codec::{BuildMode, Payload, UdpHeader, UdpPacket, UdpPacketBuilder};

#[derive(Parser)]
#[command(author, version, about = "UDPデータグラムのデコード・構築", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 16進数のUDPデータグラムをデコードする
    Decode {
        /// ヘッダーを含むデータグラム (16進数)
        datagram: String,

        /// 送信元IPアドレス (検証に使う)
        #[arg(long)]
        src: Option<IpAddr>,

        /// 宛先IPアドレス (検証に使う)
        #[arg(long)]
        dst: Option<IpAddr>,

        /// JSONで出力する
        #[arg(long)]
        json: bool,
    },
    /// 値からUDPデータグラムを構築する
    Build(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    #[arg(long)]
    src_port: u16,

    #[arg(long)]
    dst_port: u16,

    /// ペイロード (16進数、空にする場合は "")
    #[arg(long)]
    payload: Option<String>,

    #[arg(long)]
    src: Option<IpAddr>,

    #[arg(long)]
    dst: Option<IpAddr>,

    /// 長さとチェックサムを計算せず指定値を使う
    #[arg(long, requires_all = ["length", "checksum"])]
    explicit: bool,

    #[arg(long, requires = "explicit")]
    length: Option<u16>,

    #[arg(long, requires = "explicit")]
    checksum: Option<u16>,
}

impl BuildArgs {
    // ペイロードが省略された場合はビルド時にエラーになる
    fn into_builder(self) -> CodecResult<UdpPacketBuilder> {
        Ok(UdpPacketBuilder {
            source_port: self.src_port,
            destination_port: self.dst_port,
            length: self.length.unwrap_or_default(),
            checksum: self.checksum.unwrap_or_default(),
            payload: self
                .payload
                .as_deref()
                .map(parse_hex)
                .transpose()?
                .map(Payload::from),
            source_address: self.src,
            destination_address: self.dst,
            mode: if self.explicit { BuildMode::Explicit } else { BuildMode::Auto },
        })
    }
}

#[derive(Serialize)]
struct DatagramReport {
    header: UdpHeader,
    payload_length: usize,
    payload: String,
    valid: Option<bool>,
}

fn main() -> Result<(), InitProcessError> {
    let cli = Cli::parse();

    let config = Configuration::from_env().map_err(|e| InitProcessError::ConfigError(e.to_string()))?;
    setup_logger(&config.log_level).map_err(|e| InitProcessError::LoggerError(e.to_string()))?;
    info!("設定を読み込みました: {:?}", config.codec);

    let result = match cli.command {
        Commands::Decode { datagram, src, dst, json } => decode(&datagram, src, dst, json, &config.codec),
        Commands::Build(args) => args
            .into_builder()
            .map_err(InitProcessError::from)
            .and_then(|builder| build(builder, &config.codec)),
    };

    if let Err(e) = &result {
        error!("処理に失敗しました: {}", e);
    }

    result
}

fn decode(
    datagram: &str,
    src: Option<IpAddr>,
    dst: Option<IpAddr>,
    json: bool,
    config: &CodecConfig,
) -> Result<(), InitProcessError> {
    let raw = parse_hex(datagram)?;
    let packet = UdpPacket::parse(&raw)?;

    let valid = match validation_addresses(src, dst)? {
        Some((src, dst)) => Some(packet.is_valid(src, dst, config)?),
        None => None,
    };

    if json {
        let report = DatagramReport {
            header: *packet.header(),
            payload_length: packet.payload().len(),
            payload: to_hex_string(&packet.payload().raw_data(), ""),
            valid,
        };
        let output = serde_json::to_string_pretty(&report)
            .map_err(|e| InitProcessError::OutputError(e.to_string()))?;
        println!("{}", output);
    } else {
        print!("{}", packet);
        if let Some(valid) = valid {
            println!("Valid: {}", valid);
        }
    }

    Ok(())
}

// 検証にはアドレスが両方必要
fn validation_addresses(
    src: Option<IpAddr>,
    dst: Option<IpAddr>,
) -> CodecResult<Option<(IpAddr, IpAddr)>> {
    match (src, dst) {
        (Some(src), Some(dst)) => Ok(Some((src, dst))),
        (None, None) => Ok(None),
        (None, Some(_)) => Err(CodecError::MissingAddress("送信元")),
        (Some(_), None) => Err(CodecError::MissingAddress("宛先")),
    }
}

fn build(builder: UdpPacketBuilder, config: &CodecConfig) -> Result<(), InitProcessError> {
    let packet = builder.build(config)?;
    info!(
        "{}バイトのデータグラムを構築しました",
        packet.len()
    );

    print!("{}", packet);
    println!("{}", to_hex_string(&packet.to_bytes(), ""));

    Ok(())
}

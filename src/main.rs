//! Thin CLI around the library: pick a backend, run one query, print it.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use evmproxy::{config, Params, ProxyApi, ProxyClient, ReceiptStatus, RpcMethod};

#[derive(Debug, Parser)]
#[command(
    name = "evmproxy",
    version,
    about = "One client for EVM JSON-RPC gateways and explorer REST proxies"
)]
struct Args {
    /// Backend kind: node, alchemy, infura, bscscan, etherscan
    #[arg(long)]
    provider: Option<String>,

    /// JSON-RPC gateway URL (node provider only)
    #[arg(long)]
    gateway: Option<String>,

    /// Provider API key
    #[arg(long)]
    api_key: Option<String>,

    /// Network tag: mainnet or a named testnet
    #[arg(long)]
    network: Option<String>,

    /// Etherscan v2 chain id
    #[arg(long)]
    chain_id: Option<u64>,

    /// Basic-auth user (node provider only)
    #[arg(long)]
    user: Option<String>,

    /// Basic-auth password (node provider only)
    #[arg(long)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Current gas price as a hex quantity
    GasPrice,
    /// Native balance as a decimal display amount
    Balance { address: String },
    /// Transaction count at the latest block
    Nonce { address: String },
    /// Latest block height
    BlockNumber,
    /// Block lookup by height
    Block {
        height: u64,
        /// Return transaction hashes instead of full objects
        #[arg(long)]
        no_transactions: bool,
    },
    /// Transaction count of a block
    BlockTxCount { height: u64 },
    /// Transaction lookup by block height and index
    TxByIndex { height: u64, index: u64 },
    /// Raw transaction lookup
    Tx { hash: String },
    /// Raw receipt lookup
    Receipt { hash: String },
    /// Three-valued receipt status: not-found, pending, success, failed
    ReceiptStatus { hash: String },
    /// eth_call returning hex data
    Call {
        to: String,
        data: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Gas estimate for a call
    EstimateGas {
        data: String,
        to: String,
        #[arg(long, default_value_t = 0)]
        value: u64,
        #[arg(long, default_value_t = 0)]
        gas: u64,
        #[arg(long, default_value_t = 0)]
        gas_price: u64,
    },
    /// Broadcast a signed raw transaction
    SendRaw { hex: String },
    /// Escape hatch: any logical method with name=value parameters
    Send {
        method: String,
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = config::load();
    let client = build_client(&args, &config.provider)?;
    run(&client, &args.command).await
}

/// Flags win over the config file; defaults are mainnet and chain id 1.
fn build_client(args: &Args, spec: &config::ProviderSpec) -> Result<ProxyClient> {
    let kind = args
        .provider
        .clone()
        .or_else(|| spec.kind.clone())
        .unwrap_or_else(|| "node".to_string());
    let network = args
        .network
        .clone()
        .or_else(|| spec.network.clone())
        .unwrap_or_else(|| "mainnet".to_string());
    let api_key = args.api_key.clone().or_else(|| spec.api_key.clone());

    match kind.as_str() {
        "node" => {
            let gateway = args
                .gateway
                .clone()
                .or_else(|| spec.gateway.clone())
                .context("a gateway URL is required for the node provider")?;
            let user = args.user.clone().or_else(|| spec.user.clone());
            let password = args.password.clone().or_else(|| spec.password.clone());
            let auth = match (user, password) {
                (Some(user), Some(password)) => Some((user, password)),
                _ => None,
            };
            Ok(ProxyClient::node(gateway, auth, network))
        }
        "alchemy" => {
            let key = api_key.context("--api-key is required for alchemy")?;
            Ok(ProxyClient::alchemy(&key, &network))
        }
        "infura" => {
            let key = api_key.context("--api-key is required for infura")?;
            Ok(ProxyClient::infura(&key, &network))
        }
        "bscscan" => {
            let key = api_key.context("--api-key is required for bscscan")?;
            Ok(ProxyClient::bscscan(key, network))
        }
        "etherscan" => {
            let key = api_key.context("--api-key is required for etherscan")?;
            let chain_id = args.chain_id.or(spec.chain_id).unwrap_or(1);
            Ok(ProxyClient::etherscan(key, chain_id))
        }
        other => bail!("unknown provider kind: {other}"),
    }
}

async fn run(client: &ProxyClient, command: &Command) -> Result<()> {
    match command {
        Command::GasPrice => println!("{}", client.gas_price().await?),
        Command::Balance { address } => println!("{}", client.bnb_balance(address).await?),
        Command::Nonce { address } => println!("{}", client.nonce(address).await?),
        Command::BlockNumber => println!("{}", client.block_number().await?),
        Command::Block {
            height,
            no_transactions,
        } => print_json(&client.block_by_number(*height, !*no_transactions).await?)?,
        Command::BlockTxCount { height } => {
            println!("{}", client.block_transaction_count(*height).await?)
        }
        Command::TxByIndex { height, index } => {
            print_json(&client.transaction_by_block_and_index(*height, *index).await?)?
        }
        Command::Tx { hash } => print_json(&client.transaction_by_hash(hash).await?)?,
        Command::Receipt { hash } => print_json(&client.transaction_receipt(hash).await?)?,
        Command::ReceiptStatus { hash } => {
            let text = match client.receipt_status(hash).await? {
                ReceiptStatus::NotFound => "not-found",
                ReceiptStatus::Pending => "pending",
                ReceiptStatus::Mined(true) => "success",
                ReceiptStatus::Mined(false) => "failed",
            };
            println!("{text}");
        }
        Command::Call {
            to,
            data,
            from,
            tag,
        } => println!(
            "{}",
            client
                .eth_call(to, data, from.as_deref(), tag.as_deref())
                .await?
        ),
        Command::EstimateGas {
            data,
            to,
            value,
            gas,
            gas_price,
        } => println!(
            "{}",
            client
                .estimate_gas(data, to, *value, *gas, *gas_price)
                .await?
        ),
        Command::SendRaw { hex } => println!("{}", client.send_raw_transaction(hex).await?),
        Command::Send { method, params } => {
            let method = RpcMethod::from_logical(method)
                .with_context(|| format!("unrecognized logical method: {method}"))?;
            let mut parsed = Params::new();
            for pair in params {
                let (name, raw) = pair
                    .split_once('=')
                    .with_context(|| format!("parameter {pair:?} is not name=value"))?;
                let value = serde_json::from_str::<Value>(raw)
                    .unwrap_or_else(|_| Value::String(raw.to_string()));
                parsed = parsed.push(name, value);
            }
            print_json(&client.send(method, parsed).await?)?;
        }
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

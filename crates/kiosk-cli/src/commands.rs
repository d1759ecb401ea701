// SPDX-License-Identifier: Apache-2.0

//! Verb-object command tree exercising each `Display` RPC, modeled on the
//! original `k` tool's `k <verb> <object> <args>` grammar (`k create kiosk
//! NAME`, `k set SIGN_ID kiosk KIOSK_ID`, `k set SIGN_ID all-kiosks`, …).

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use tokio_stream::StreamExt;

use kiosk_server::transport::grpc::proto;

use crate::client::Client;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a kiosk or sign.
    #[command(subcommand)]
    Create(CreateEntity),
    /// List kiosks or signs.
    #[command(subcommand)]
    List(ListEntity),
    /// Get a kiosk, a sign, or a kiosk's current sign assignment.
    #[command(subcommand)]
    Get(GetEntity),
    /// Delete a kiosk or sign.
    #[command(subcommand)]
    Delete(DeleteEntity),
    /// Set the sign a kiosk, or every kiosk, should display.
    Set(SetArgs),
}

#[derive(Debug, Subcommand)]
pub enum CreateEntity {
    /// Register a new kiosk.
    Kiosk {
        name: String,
        /// Opaque descriptive attribute, `key=value`. May be repeated.
        #[arg(long = "attr", value_parser = parse_attribute)]
        attr: Vec<(String, String)>,
    },
    /// Register a new sign.
    Sign {
        name: String,
        /// Text to display on the sign.
        #[arg(long)]
        text: Option<String>,
        /// Path to a PNG (or other) image file read verbatim into the
        /// sign's image payload.
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListEntity {
    Kiosks,
    Signs,
}

#[derive(Debug, Subcommand)]
pub enum GetEntity {
    Kiosk { id: i32 },
    Sign { id: i32 },
    /// The sign currently assigned to a kiosk (unary).
    #[command(name = "sign-for-kiosk")]
    SignForKiosk { kiosk_id: i32 },
    /// Watch the sign assigned to a kiosk; streams until the server
    /// closes the session or the process is interrupted.
    #[command(name = "signs-for-kiosk")]
    SignsForKiosk { kiosk_id: i32 },
}

#[derive(Debug, Subcommand)]
pub enum DeleteEntity {
    Kiosk { id: i32 },
    Sign { id: i32 },
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Sign to assign.
    pub sign_id: i32,
    #[command(subcommand)]
    pub target: SetTarget,
}

#[derive(Debug, Subcommand)]
pub enum SetTarget {
    /// Assign to one kiosk.
    Kiosk { kiosk_id: i32 },
    /// Assign to every currently known kiosk.
    #[command(name = "all-kiosks")]
    AllKiosks,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) => Ok((k.to_owned(), v.to_owned())),
        None => Err(format!("expected key=value, got '{raw}'")),
    }
}

/// Truncate an image payload before printing: dumping kilobytes of binary
/// to a terminal is never useful, so show only its length.
fn format_sign(sign: &proto::Sign) -> String {
    let image = match &sign.image {
        Some(bytes) => format!("Some({} bytes)", bytes.len()),
        None => "None".to_owned(),
    };
    format!(
        "Sign {{ id: {}, name: {:?}, text: {:?}, image: {image} }}",
        sign.id, sign.name, sign.text
    )
}

fn format_kiosk(kiosk: &proto::Kiosk) -> String {
    format!("Kiosk {{ id: {}, name: {:?}, attributes: {:?} }}", kiosk.id, kiosk.name, kiosk.attributes)
}

pub async fn run(client: &mut Client, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Create(CreateEntity::Kiosk { name, attr }) => {
            let attributes: BTreeMap<String, String> = attr.into_iter().collect();
            let kiosk = client
                .create_kiosk(proto::Kiosk { id: 0, name, attributes: attributes.into_iter().collect() })
                .await?
                .into_inner();
            println!("{}", format_kiosk(&kiosk));
        }
        Command::Create(CreateEntity::Sign { name, text, image }) => {
            let image_bytes = match image {
                Some(path) => Some(std::fs::read(&path)?),
                None => None,
            };
            let sign = client
                .create_sign(proto::Sign { id: 0, name, text, image: image_bytes })
                .await?
                .into_inner();
            println!("{}", format_sign(&sign));
        }
        Command::List(ListEntity::Kiosks) => {
            let response = client.list_kiosks(proto::Empty {}).await?.into_inner();
            for kiosk in &response.kiosks {
                println!("{}", format_kiosk(kiosk));
            }
        }
        Command::List(ListEntity::Signs) => {
            let response = client.list_signs(proto::Empty {}).await?.into_inner();
            for sign in &response.signs {
                println!("{}", format_sign(sign));
            }
        }
        Command::Get(GetEntity::Kiosk { id }) => {
            let kiosk = client.get_kiosk(proto::GetKioskRequest { id }).await?.into_inner();
            println!("{}", format_kiosk(&kiosk));
        }
        Command::Get(GetEntity::Sign { id }) => {
            let sign = client.get_sign(proto::GetSignRequest { id }).await?.into_inner();
            println!("{}", format_sign(&sign));
        }
        Command::Get(GetEntity::SignForKiosk { kiosk_id }) => {
            let response =
                client.get_sign_for_kiosk(proto::GetSignForKioskRequest { kiosk_id }).await?.into_inner();
            println!("sign_id: {}", response.sign_id);
        }
        Command::Get(GetEntity::SignsForKiosk { kiosk_id }) => {
            let mut stream =
                client.get_signs_for_kiosk(proto::GetSignForKioskRequest { kiosk_id }).await?.into_inner();
            while let Some(message) = stream.next().await {
                let response = message?;
                println!("sign_id: {}", response.sign_id);
            }
        }
        Command::Delete(DeleteEntity::Kiosk { id }) => {
            client.delete_kiosk(proto::DeleteKioskRequest { id }).await?;
            println!("deleted");
        }
        Command::Delete(DeleteEntity::Sign { id }) => {
            client.delete_sign(proto::DeleteSignRequest { id }).await?;
            println!("deleted");
        }
        Command::Set(SetArgs { sign_id, target: SetTarget::Kiosk { kiosk_id } }) => {
            client
                .set_sign_for_kiosks(proto::SetSignForKiosksRequest { sign_id, kiosk_ids: vec![kiosk_id] })
                .await?;
            println!("set kiosk {kiosk_id} to sign {sign_id}");
        }
        Command::Set(SetArgs { sign_id, target: SetTarget::AllKiosks }) => {
            client
                .set_sign_for_kiosks(proto::SetSignForKiosksRequest { sign_id, kiosk_ids: vec![] })
                .await?;
            println!("set all kiosks to sign {sign_id}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

// SPDX-License-Identifier: Apache-2.0

//! Preloads a `kioskd` instance with signs: deletes every existing sign,
//! then creates one new sign per file in a directory, named after the
//! file's stem with its bytes as the sign's image payload.
//!
//! Grounded on the original `images/preload.go` helper, generalized from a
//! fixed five-file list to any directory of image files.

use clap::Parser;
use kiosk_cli::client;
use kiosk_cli::config::ConnectionArgs;
use kiosk_server::transport::grpc::proto;

#[derive(Parser)]
#[command(name = "kiosk-preload", version, about)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Directory of image files, one sign per file.
    directory: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut client = client::connect(&cli.connection).await?;

    let existing = client.list_signs(proto::Empty {}).await?.into_inner().signs;
    for sign in existing {
        println!("deleting sign {}", sign.id);
        client.delete_sign(proto::DeleteSignRequest { id: sign.id }).await?;
    }

    let mut entries: Vec<_> = std::fs::read_dir(&cli.directory)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned)
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(&path)?;
        println!("creating sign {name}");
        client
            .create_sign(proto::Sign { id: 0, name: name.clone(), text: Some(name), image: Some(bytes) })
            .await?;
    }

    Ok(())
}

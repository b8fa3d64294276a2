//! Notification example
//!
//! Acquires a token, sends a text message, then uploads a file and sends it
//! as a file message.
//!
//! Run with:
//! WECOM_CORP_ID=ww... WECOM_CORP_SECRET=... WECOM_AGENT_ID=1000002 \
//!     cargo run --example send_notification -- alice /tmp/report.pdf

use wecom_sdk::{
    api::{MediaRef, MediaType},
    types::{AgentId, CorpId, CorpSecret},
    ClientConfig, Wecom,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let recipient = args.next().unwrap_or_else(|| "@all".to_string());
    let attachment = args.next();

    // Optional JSON config, e.g. {"base_url": "https://qyapi.weixin.qq.com", "timeout_secs": 5}
    let config: ClientConfig = match std::env::var("WECOM_CONFIG") {
        Ok(raw) => serde_json::from_str(&raw)?,
        Err(_) => ClientConfig::default(),
    };

    let wecom = Wecom::builder().config(&config).build()?;

    let corp_id = CorpId::new(std::env::var("WECOM_CORP_ID")?)?;
    let corp_secret = CorpSecret::new(std::env::var("WECOM_CORP_SECRET")?)?;
    let agent = AgentId::new(std::env::var("WECOM_AGENT_ID")?)?;

    let token = wecom.acquire_token(&corp_id, &corp_secret).await?;
    println!("Token valid for {}s", token.expires_in);
    let token = token.access_token;

    let receipt = wecom
        .send_text(&token, &agent, &recipient, "Hello from Rust SDK!")
        .await?;
    if receipt.has_invalid_recipients() {
        eprintln!("Some recipients were rejected: {:?}", receipt);
    }

    if let Some(path) = attachment {
        let file = tokio::fs::File::open(&path).await?;
        let uploaded = wecom
            .upload_media(&token, file, &path, MediaType::File)
            .await?;
        println!("Uploaded {} as {}", path, uploaded.media_id.as_str());

        match wecom
            .send_media(&token, &agent, &recipient, &MediaRef::file(uploaded.media_id))
            .await
        {
            Ok(_) => println!("File message sent!"),
            Err(e) if e.is_transient() => eprintln!("Temporary failure, try again: {}", e),
            Err(e) => eprintln!("Failed to send: {}", e),
        }
    }

    Ok(())
}

use std::sync::Arc;

use anyhow::Result;
use console::style;
use dialoguer::Password;

use geolens_client::{GeoLensClient, Registration};

pub async fn login(client: Arc<GeoLensClient>, email: &str) -> Result<()> {
    let password = Password::new().with_prompt("Password").interact()?;
    client.login(email, &password).await?;
    println!("{} logged in as {email}", style("✓").green());
    Ok(())
}

pub async fn register(
    client: Arc<GeoLensClient>,
    email: &str,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    client
        .register(&Registration {
            email: email.to_string(),
            password,
            first_name,
            last_name,
        })
        .await?;
    println!("{} account created, logged in as {email}", style("✓").green());
    Ok(())
}

pub async fn logout(client: Arc<GeoLensClient>) -> Result<()> {
    client.logout().await?;
    println!("{} logged out", style("✓").green());
    Ok(())
}

pub async fn whoami(client: Arc<GeoLensClient>) -> Result<()> {
    let account = client.me().await?;
    let name = [account.first_name, account.last_name]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        println!("{}", account.email);
    } else {
        println!("{name} <{}>", account.email);
    }
    if let Some(role) = account.role {
        println!("role: {role}");
    }
    Ok(())
}

use crate::DEFAULT_BASE_URL;
use asset_transfer_common::cli::constants::*;
use asset_transfer_common::cli::helpers::*;
use asset_transfer_common::requests::InvokeRequest;
use asset_transfer_common::response::Response;
use reqwest::{Client, StatusCode, Url};
use std::collections::BTreeMap;
use std::error::Error;

pub async fn main_loop(base_url: Url) -> Result<(), Box<dyn Error>> {
    let client = Client::new();

    loop {
        if let Some(line) = read_from_stdin(PROMPT) {
            let words = line.split_whitespace().collect::<Vec<_>>();
            let cmd = words[0].to_lowercase();

            match cmd.as_str() {
                HELP | "h" => help(),
                STATE | "s" => print_state(&client, &base_url).await?,
                ID => print_id(&client, &base_url).await?,
                EXIT | "x" => break,
                _ => match to_invocation(&words) {
                    Some((function, args)) => invoke(&client, &base_url, function, args).await?,
                    None => println!("Unrecognized command; try `help`."),
                },
            }
        }
    }

    Ok(())
}

/// **Get base URL**
///
/// Tries to create a URL from the provided argument.
///
/// If that is not possible, falls back to a default.
///
/// It returns a URL in any case.
///
/// This is meant to be a base URL for all operations.
///
/// - If the provided argument is the `None` variant,
///   returns a default value as the base URL.
/// - If it's a `String`, tries to parse it into URL.
///   - If it's a valid URL string, returns it as URL.
///   - If it's a malformed URL string, returns the default.
///
/// The default value is [`DEFAULT_BASE_URL`].
pub fn get_base_url(base_url: Option<String>) -> Url {
    let base_url = base_url.unwrap_or_else(|| {
        println!(
            "No CLI base URL provided; using default: {}",
            DEFAULT_BASE_URL
        );
        DEFAULT_BASE_URL.into()
    });

    Url::parse(base_url.as_str()).unwrap_or_else(|_| {
        println!(
            "Provided base URL could not be parsed; using default: {}",
            DEFAULT_BASE_URL
        );
        Url::parse(DEFAULT_BASE_URL).expect("The default base URL is valid.")
    })
}

/// **Send an invocation to the web service**
///
/// Both successful and rejected invocations come back as a chaincode
/// [`Response`], which gets printed.
/// Anything else (for example, a failing state store on the service side)
/// is printed with its status code.
async fn invoke(
    client: &Client,
    base_url: &Url,
    function: String,
    args: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    let url = base_url.join("invoke")?;

    let response = client
        .post(url)
        .json(&InvokeRequest { function, args })
        .send()
        .await?;

    let status = response.status();
    if status.is_success() || status == StatusCode::BAD_REQUEST {
        let response: Response = response.json().await?;
        print_response(&response);
    } else {
        eprintln!("[ERROR] {} \"{}\"", status, response.text().await?);
    }

    Ok(())
}

/// **Print the identity of the hosted chaincode**
async fn print_id(client: &Client, base_url: &Url) -> Result<(), Box<dyn Error>> {
    let url = base_url.join("id")?;
    let response = client.get(url).send().await?;

    if response.status() == StatusCode::OK {
        let id: String = response.json().await?;
        println!("{}", id);
    } else {
        eprintln!("[ERROR] \"{}\"", response.text().await?);
    }

    Ok(())
}

/// **Print every key and its value**
async fn print_state(client: &Client, base_url: &Url) -> Result<(), Box<dyn Error>> {
    let url = base_url.join("state")?;
    let response = client.get(url).send().await?;

    if response.status() == StatusCode::OK {
        let state: BTreeMap<String, String> = response.json().await?;
        println!("State: {:#?}", state);
    } else {
        eprintln!("[ERROR] \"{}\"", response.text().await?);
    }

    Ok(())
}

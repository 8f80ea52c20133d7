// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! httpbridge CLI
//!
//! Drives the fallback engine from the command line.

use std::env;
use std::process::ExitCode;

use httpbridge::{
    progress_channel, DownloadFileOptions, ErrorContext, HostEnvironment, Http, HttpPlugin, HttpResponse, RequestOptions,
    ResponseData,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("httpbridge=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "get" => {
            if args.len() < 3 {
                eprintln!("Usage: httpbridge get <url>");
                return ExitCode::from(1);
            }
            get_url(&args[2]).await
        }
        "post" => {
            if args.len() < 4 {
                eprintln!("Usage: httpbridge post <url> <json>");
                return ExitCode::from(1);
            }
            post_json(&args[2], &args[3]).await
        }
        "download" => {
            if args.len() < 3 {
                eprintln!("Usage: httpbridge download <url> [out]");
                return ExitCode::from(1);
            }
            download(&args[2], args.get(3).map(String::as_str)).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("httpbridge {}", httpbridge::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"httpbridge - HTTP plugin fallback engine

USAGE:
    httpbridge <COMMAND> [OPTIONS]

COMMANDS:
    get <url>               Fetch a URL and print the decoded response
    post <url> <json>       POST a JSON body
    download <url> [out]    Download a file, printing progress
    help                    Show this help message
    version                 Show version information

EXAMPLES:
    httpbridge get https://httpbin.org/get
    httpbridge post https://httpbin.org/post '{{"name": "value"}}'
    httpbridge download https://example.com/file.bin file.bin

Set RUST_LOG=httpbridge=debug for request details.
"#
    );
}

fn register() -> Option<Http> {
    match Http::register(HostEnvironment::web()) {
        Ok(http) => Some(http),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            None
        }
    }
}

fn print_response(response: &HttpResponse) {
    println!("\n=== Response ===");
    println!("Status: {}", response.status);
    println!("URL: {}", response.url);
    println!("Content-Type: {}", response.content_type().unwrap_or("(none)"));

    println!("\n=== Body ===");
    match response.data {
        ResponseData::Json(ref value) => match serde_json::to_string_pretty(value) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", value),
        },
        ResponseData::Text(ref text) => println!("{}", text),
        ResponseData::Base64(ref data) => println!("(base64, {} chars)", data.len()),
    }
}

async fn get_url(url: &str) -> ExitCode {
    let Some(http) = register() else {
        return ExitCode::from(1);
    };

    match http.get(RequestOptions::new(url)).await {
        Ok(response) => {
            print_response(&response);
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn post_json(url: &str, body: &str) -> ExitCode {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid JSON body: {}", e);
            return ExitCode::from(1);
        }
    };

    let Some(http) = register() else {
        return ExitCode::from(1);
    };

    let options = RequestOptions::new(url)
        .header("Content-Type", "application/json")
        .json(value);

    match http.post(options).await {
        Ok(response) => {
            print_response(&response);
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn download(url: &str, out: Option<&str>) -> ExitCode {
    let Some(http) = register() else {
        return ExitCode::from(1);
    };

    println!("Downloading: {}", url);

    let (tx, mut rx) = progress_channel();
    let printer = tokio::spawn(async move {
        while let Some(p) = rx.recv().await {
            if p.content_length > 0 {
                println!(
                    "  {} / {} bytes ({}%)",
                    p.bytes,
                    p.content_length,
                    p.bytes * 100 / p.content_length
                );
            } else {
                println!("  {} bytes", p.bytes);
            }
        }
    });

    let result = http
        .download_file(DownloadFileOptions::new(url).progress(true), Some(tx))
        .await;
    // sender is dropped with the download, so the printer drains and exits
    let _ = printer.await;

    let blob = match result {
        Ok(result) => result.blob,
        Err(e) => {
            eprintln!("Download failed: {}", e);
            return ExitCode::from(1);
        }
    };

    println!(
        "\nReceived {} bytes ({})",
        blob.size(),
        blob.content_type().unwrap_or("unknown type")
    );

    if let Some(path) = out {
        if let Err(e) = tokio::fs::write(path, blob.bytes())
            .await
            .context(&format!("writing {}", path))
        {
            eprintln!("Failed to save download: {}", e);
            return ExitCode::from(1);
        }
        println!("Saved to {}", path);
    }

    ExitCode::SUCCESS
}

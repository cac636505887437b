//! `jobsuite upload` — media uploads onto an estimate.

use std::path::Path;

use anyhow::Context as _;
use jobsuite_config::AwsConfig;
use jobsuite_uploads::{MultipartTarget, PostPolicySigner, UploadLimits, upload_presigned};

use crate::cli::{UploadAction, UploadArgs};
use crate::commands::print_json;
use crate::context::AppContext;

pub async fn handle(action: &UploadAction, ctx: AppContext) -> anyhow::Result<()> {
    match action {
        UploadAction::Image(args) => image(args, &ctx).await,
        UploadAction::Video(args) => video(args, &ctx).await,
    }
}

async fn image(args: &UploadArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let (file_name, bytes) = read_file(&args.file)?;
    let content_type = content_type(&file_name)
        .filter(|ct| ct.starts_with("image/"))
        .context("unsupported image type (expected jpg, jpeg, png, gif, or webp)")?;
    anyhow::ensure!(
        bytes.len() as u64 <= UploadLimits::IMAGE.max_bytes,
        "file exceeds the 150 MiB image limit"
    );

    let production = ctx.config.backend.is_production();
    let bucket = if ctx.config.aws.image_bucket.is_empty() {
        AwsConfig::default_image_bucket(production)
    } else {
        ctx.config.aws.image_bucket.clone()
    };
    let signer = PostPolicySigner::from_config(&ctx.config.aws, production)?;
    let key = format!("{}/{file_name}", args.estimate);
    let post = signer.presign(&bucket, &key, content_type, UploadLimits::IMAGE)?;

    upload_presigned(&ctx.http, &post, &file_name, content_type, bytes).await?;
    print_json(&serde_json::json!({ "uploaded": key, "bucket": bucket }))
}

async fn video(args: &UploadArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let (file_name, bytes) = read_file(&args.file)?;
    let content_type = content_type(&file_name)
        .filter(|ct| ct.starts_with("video/"))
        .context("unsupported video type (expected mp4, mov, or webm)")?;
    anyhow::ensure!(
        bytes.len() as u64 <= UploadLimits::VIDEO.max_bytes,
        "file exceeds the 1 GiB video limit"
    );

    let token = ctx.token()?;
    let contractor_id = ctx.contractor_id(&token).await?;
    let target = MultipartTarget {
        token: &token,
        contractor_id: &contractor_id,
        estimate_id: &args.estimate,
    };
    let progress = |done: usize, total: usize| {
        eprintln!("uploaded part {done}/{total}");
    };
    let resource = jobsuite_uploads::upload_multipart(
        &ctx.backend,
        &ctx.http,
        &target,
        &file_name,
        content_type,
        &bytes,
        Some(&progress),
    )
    .await?;
    print_json(&resource)
}

fn read_file(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("file path has no usable file name")?
        .to_string();
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok((file_name, bytes))
}

fn content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        "webm" => Some("video/webm"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type("deck photo.JPG"), Some("image/jpeg"));
        assert_eq!(content_type("walkthrough.mp4"), Some("video/mp4"));
        assert_eq!(content_type("notes.txt"), None);
        assert_eq!(content_type("no_extension"), None);
    }
}

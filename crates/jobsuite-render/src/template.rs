//! Estimate proposal document generation.
//!
//! Produces the full HTML document the e-signature provider and the PDF
//! pipeline consume. Layout and styles track the document the clients are
//! used to; the letterhead comes from [`BusinessInfo`] instead of being
//! baked in.

use chrono::{Datelike, NaiveDate, Utc};
use jobsuite_config::AwsConfig;
use jobsuite_core::{ContractorClient, Estimate, EstimateLineItem, EstimateResource, ResourceType};

/// Letterhead and footer identity.
#[derive(Debug, Clone)]
pub struct BusinessInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub logo_url: String,
}

impl Default for BusinessInfo {
    fn default() -> Self {
        Self {
            name: "JobSuite".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            logo_url: String::new(),
        }
    }
}

/// "Prepared For" block, fallbacks already applied.
#[derive(Debug, Clone, Default)]
pub struct TemplateClient {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub email: String,
}

/// One priced description block.
#[derive(Debug, Clone)]
pub struct TemplateItem {
    pub header: String,
    pub content: String,
    pub price: f64,
}

/// Everything the proposal document needs.
#[derive(Debug, Clone)]
pub struct TemplateInput {
    pub business: BusinessInfo,
    pub client: TemplateClient,
    pub items: Vec<TemplateItem>,
    /// Cover image URL; empty renders no image.
    pub image: String,
    /// Notes, already rendered to HTML.
    pub notes: String,
    pub discount_reason: Option<String>,
    pub discount_percentage: Option<f64>,
    /// Short human-facing id, the first `-`-separated segment of the
    /// estimate id.
    pub estimate_number: String,
}

impl TemplateInput {
    /// Assemble the template input from backend records.
    ///
    /// Missing client contact fields fall back to `Undefined Name` /
    /// `Undefined Email` / `Undefined Phone Number`; address fields come
    /// from the estimate first, then the client.
    #[must_use]
    pub fn from_records(
        estimate: &Estimate,
        client: &ContractorClient,
        line_items: &[EstimateLineItem],
        resources: &[EstimateResource],
        production: bool,
    ) -> Self {
        let items = line_items
            .iter()
            .map(|item| TemplateItem {
                header: item.title.clone().unwrap_or_default(),
                content: item.description.clone().unwrap_or_default(),
                price: item.price(),
            })
            .collect();

        Self {
            business: BusinessInfo::default(),
            client: TemplateClient {
                name: fallback(client.name.as_deref(), "Undefined Name"),
                address: estimate
                    .address_street
                    .clone()
                    .or_else(|| client.address_street.clone())
                    .unwrap_or_default(),
                city: estimate
                    .address_city
                    .clone()
                    .or_else(|| client.address_city.clone())
                    .unwrap_or_default(),
                state: estimate
                    .address_state
                    .clone()
                    .or_else(|| client.address_state.clone())
                    .unwrap_or_default(),
                phone: fallback(client.phone_number.as_deref(), "Undefined Phone Number"),
                email: fallback(client.email.as_deref(), "Undefined Email"),
            },
            items,
            image: cover_image_url(estimate, resources, production),
            notes: crate::markdown::to_html(
                estimate.transcription_summary.as_deref().unwrap_or(""),
            ),
            discount_reason: estimate.discount_reason.clone(),
            discount_percentage: estimate.discount_percentage,
            estimate_number: estimate_number(&estimate.id),
        }
    }
}

fn fallback(value: Option<&str>, undefined: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => undefined.to_string(),
    }
}

/// The short estimate number shown on the document.
#[must_use]
pub fn estimate_number(estimate_id: &str) -> String {
    estimate_id
        .split('-')
        .next()
        .unwrap_or(estimate_id)
        .to_string()
}

/// Pick the cover image URL for an estimate.
///
/// The cover-photo resource wins when set, else the first image. Records
/// with `s3_bucket`/`s3_key` build the bucket URL directly; legacy records
/// fall back to `resource_location` in the environment's default image
/// bucket. No usable image renders as an empty string.
#[must_use]
pub fn cover_image_url(
    estimate: &Estimate,
    resources: &[EstimateResource],
    production: bool,
) -> String {
    let images: Vec<&EstimateResource> = resources
        .iter()
        .filter(|r| r.resource_type == ResourceType::Image)
        .collect();
    let Some(first) = images.first() else {
        return String::new();
    };

    let selected = estimate
        .cover_photo_resource_id
        .as_deref()
        .and_then(|cover_id| images.iter().find(|r| r.id == cover_id))
        .unwrap_or(first);

    let region = if production { "us-east-1" } else { "us-west-2" };

    if let (Some(bucket), Some(key)) = (&selected.s3_bucket, &selected.s3_key) {
        return format!("https://{bucket}.s3.{region}.amazonaws.com/{key}");
    }
    if let Some(location) = &selected.resource_location {
        let bucket = selected
            .s3_bucket
            .clone()
            .unwrap_or_else(|| AwsConfig::default_image_bucket(production));
        return format!("https://{bucket}.s3.{region}.amazonaws.com/{location}");
    }
    String::new()
}

/// US-locale currency string: `$1,234.56`, negatives as `-$1,234.56`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// `M/D/YYYY` with no zero padding.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Render the full proposal document dated today.
#[must_use]
pub fn generate(input: &TemplateInput) -> String {
    generate_on(input, Utc::now().date_naive())
}

fn descriptions_html(items: &[TemplateItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            r#"
            <div class="description">
                <div class="price-section">
                    <p>{}</p>
                    <p>{}</p>
                </div>
                <div>
                    {}
                </div>
            </div>
        "#,
            item.header,
            format_usd(item.price),
            item.content
        ));
    }
    out
}

fn totals_html(
    items: &[TemplateItem],
    discount_reason: Option<&str>,
    discount_percentage: Option<f64>,
) -> String {
    let subtotal: f64 = items.iter().map(|item| item.price).sum();
    let discount = discount_percentage.filter(|pct| *pct > 0.0);
    let discount_amount = discount.map_or(0.0, |pct| subtotal * (pct / 100.0));
    let total = subtotal - discount_amount;

    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            r#"
            <div class="subtotal">
                <div>{}</div>
                <div style="font-weight: normal;">{}</div>
            </div>
        "#,
            item.header,
            format_usd(item.price)
        ));
    }

    let subtotal_cell = if discount.is_some() {
        format!(
            r#"<div style="display: flex; flex-direction: column">
                    <div style="font-weight: normal; text-decoration: line-through;">{}</div>
                    <div style="font-weight: normal;">{}</div>
                </div>"#,
            format_usd(subtotal),
            format_usd(total)
        )
    } else {
        format!(
            r#"<div style="font-weight: normal;">{}</div>"#,
            format_usd(subtotal)
        )
    };

    out.push_str(&format!(
        r#"
        <div class="subtotal" style="border-top: 1px solid !important; padding-top: 10px;">
            <div>Subtotal</div>
            {subtotal_cell}
        </div>
    "#
    ));

    if let Some(pct) = discount {
        out.push_str(&format!(
            r#"
            <div class="subtotal" style="border-top: 1px solid !important; padding-top: 10px;">
                <div style="color: green;">{} ({pct:.1}%)</div>
                <div style="font-weight: normal; color: green">-{}</div>
            </div>
        "#,
            discount_reason.unwrap_or("Discount"),
            format_usd(discount_amount)
        ));
    }

    out.push_str(&format!(
        r#"
        <div class="total">
            <p>Total</p>
            <p>{}</p>
        </div>
    "#,
        format_usd(total)
    ));
    out
}

/// Render the full proposal document with an explicit date.
#[must_use]
pub fn generate_on(input: &TemplateInput, date: NaiveDate) -> String {
    let business = &input.business;
    let client = &input.client;
    let logo = if business.logo_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="logo" src="{}" alt="{} Logo">"#,
            business.logo_url, business.name
        )
    };
    let image_block = if input.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="image-wrapper">
                    <img src="{}" alt="Image of the house" style="width: 720px; border-radius: 5px; display: block; margin: 30px auto;" />
                </div>

                <div class="page-break"></div>"#,
            input.image
        )
    };

    format!(
        r#"<!DOCTYPE html>
    <html lang="en">

    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <title>Estimate #{estimate_number}</title>
        <style>
            p {{
                margin: 0;
            }}

            .body-wrapper {{
                font-family: Helvetica Neue, Helvetica, Arial, sans-serif;
                line-height: 1.5;
                color: #333;
            }}

            .container {{
                background: #fff;
                padding: 40px;
                max-width: 800px;
                margin: auto;
                border: none !important;
            }}

            h1 {{
                margin: 0;
                text-align: center;
                color: lightgrey;
                font-weight: 200;
                font-family: Helvetica Neue, Helvetica, Arial, sans-serif;
            }}

            .full-page-wrapper {{
                display: flex;
                flex-direction: column;
                border: none !important;
            }}

            .top-wrapper {{
                display: flex;
                flex-direction: row;
                justify-content: space-between;
            }}

            .left-top-wrapper {{
                display: flex;
                flex: 1;
                flex-direction: column;
            }}

            .business-contact {{
                text-align: left;
            }}

            .client-contact {{
                flex: 1;
                text-align: right;
                display: flex;
                flex-direction: column;
            }}

            .estimate-meta {{
                margin-bottom: 0;
            }}

            .client-info {{
                margin-top: 0;
                padding-top: 62px;
            }}

            .client-name {{
                padding-top: 16px;
            }}

            .client-info h3 {{
                margin-top: 0;
                margin-bottom: 0;
            }}

            .image-wrapper {{
                margin-top: 30px;
            }}

            .estimate-details {{
                margin-bottom: 50px;
            }}

            .estimate-body {{
                padding-bottom: 30px;
            }}

            .terms {{
                border-bottom: none !important;
                border-top: none !important;
            }}

            .footer {{
                text-align: center;
                font-size: 0.9em;
                color: #555;
                border: none !important;
            }}

            .description {{
                border-bottom: 1px solid !important;
                padding: 10px 0;
            }}

            .price-section {{
                font-size: 18px;
                margin-bottom: 30px;
            }}

            .logo {{
                width: 40%;
                margin-bottom: 10px;
            }}

            .price-section,
            .content-headers {{
                display: flex;
                flex-direction: row;
                justify-content: space-between;
            }}

            .total {{
                border-top: 2px solid !important;
            }}
            .subtotal {{
                margin-bottom: 10px;
            }}

            .subtotal,
            .total {{
                display: flex;
                justify-content: space-between;
                flex-direction: row;
                font-weight: bold;
                font-size: 18px;
            }}

            .totals-container {{
                flex-grow: 2;
                width: 50%;
            }}

            .totals-wrapper {{
                padding: 50px 0;
                display: flex;
            }}

            .content-headers {{
                padding-bottom: 5px;
                border-bottom: 1px solid !important;
                margin-bottom: 10px;
            }}

            .notes {{
                margin-top: 30px;
                padding-top: 30px;
                padding-bottom: 30px;
            }}

            .trailer-notice {{
                page-break-inside: avoid;
                break-inside: avoid;
                margin-top: 20px;
                margin-bottom: 20px;
            }}

            .signature-section {{
                display: flex;
                flex-direction: row;
                justify-content: space-between;
                margin-bottom: 30px;
                border-bottom: none !important;
                border-top: none !important;
            }}

            .signature-field-wrapper {{
                display: flex;
                flex-direction: column;
                padding: 20px;
            }}

            .signature-field {{
                border-bottom: 1px solid !important;
                width: 300px;
                height: 80px;
            }}

            .signature-label {{
                font-size: 18px;
                text-align: center;
            }}

            .page-break {{
                page-break-before: always;
                height: 2px;
                margin-top: 20px;
            }}
        </style>
    </head>

    <body class="body-wrapper">
        <div class="full-page-wrapper">
            <div class="container">
                <h1>Project Proposal</h1>

                <div class="top-wrapper">
                    <div class="left-top-wrapper">
                        {logo}
                        <div class="business-contact">
                            <h3>{business_name}</h3>
                            <p>{business_address}</p>
                            <p>Phone: <a href="tel:{business_phone}">{business_phone}</a></p>
                            <p>Email: <a href="mailto:{business_email}">{business_email}</a></p>
                            <p>Web: <a href="{business_website}" target="_blank">{business_website}</a></p>
                        </div>
                    </div>

                    <div class="client-contact">
                        <div class="estimate-meta">
                            <p><strong>Date:</strong> {date}</p>
                            <p><strong>Estimate ID:</strong> {estimate_number}</p>
                        </div>
                        <div class="client-info">
                            <h3>Prepared For</h3>
                            <p class="client-name">{client_name}</p>
                            <p>{client_address}, {client_city}, {client_state}</p>
                            <p>Phone: {client_phone}</p>
                            <p>{client_email}</p>
                        </div>
                    </div>
                </div>

                {image_block}

                <div class="estimate-details">
                    <div class="notes">
                        <p>{notes}</p>
                    </div>
                </div>

                <div class="page-break"></div>

                <div class="estimate-details">
                    <div class="content-headers">
                        <h3>Description</h3>
                        <h3>Total</h3>
                    </div>
                    <div class="estimate-body">
                        {descriptions}
                    </div>

                    <div class="totals-wrapper">
                        <div class="totals-container"></div>
                        <div class="totals-container">
                            {totals}
                        </div>
                    </div>
                </div>

                <div class="page-break"></div>

                <div class="trailer-notice">
                    <p style="text-transform: uppercase;">
                        PLEASE NOTE THAT A WORK TRAILER WILL NEED TO BE PLACED IN HOMEOWNER'S DRIVEWAY. WE
                        ARE PROHIBITED FROM PARKING TRAILERS ON THE STREET.
                    </p>
                </div>

                <div class="terms">
                    <h3>Terms</h3>
                    <div style="margin-bottom: 30px;">
                        <ul>
                            <li>A 30% deposit is due prior to commencement of work. Balance is due upon completion.</li>
                            <li>Only payment form accepted is check.</li>
                            <li>We do not wash windows upon completion.</li>
                            <li>We do not dispose of any additional paint or stain material.</li>
                            <li>This proposal is valid for completion of the project within 6 months.</li>
                            <li>All accounts are due on completion of job.</li>
                        </ul>
                    </div>
                    <p style="margin-bottom: 30px;">
                        Customer agrees to pay {business_name} interest on all past due accounts at a rate
                        of 2% per month and agrees to pay all expenses incurred by {business_name} in
                        collecting this account, including costs and reasonable attorneys fees incurred
                        before and after suit and judgement.
                    </p>
                </div>

                <div class="signature-section">
                    <div class="signature-field-wrapper">
                        <signature-field name="{business_name} Signature" role="Service Provider" class="signature-field">
                        </signature-field>
                        <div class="signature-label">{business_name}</div>
                    </div>
                    <div class="signature-field-wrapper">
                        <signature-field name="Property Owner's Signature" role="Property Owner" class="signature-field">
                        </signature-field>
                        <div class="signature-label">{client_name}</div>
                    </div>
                </div>

                <div class="footer" style="border: none !important;">
                    <p style="border: none !important;">© {year} {business_name}. All rights reserved.</p>
                </div>
            </div>
        </div>
    </body>

    </html>
"#,
        estimate_number = input.estimate_number,
        business_name = business.name,
        business_address = business.address,
        business_phone = business.phone,
        business_email = business.email,
        business_website = business.website,
        date = format_date(date),
        year = date.year(),
        client_name = client.name,
        client_address = client.address,
        client_city = client.city,
        client_state = client.state,
        client_phone = client.phone,
        client_email = client.email,
        notes = input.notes,
        descriptions = descriptions_html(&input.items),
        totals = totals_html(
            &input.items,
            input.discount_reason.as_deref(),
            input.discount_percentage
        ),
    )
}

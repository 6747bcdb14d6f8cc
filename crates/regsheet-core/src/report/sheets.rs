use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::ApiError;
use crate::config::{SheetTarget, WriteMode};

use super::row::{OutputRow, REPORT_HEADERS};

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("No data to write to Google Sheets")]
    NoData,

    #[error("Google Sheets API error: {0}")]
    Api(#[from] ApiError),
}

/// The slice of the spreadsheet values API the sink needs
#[async_trait]
pub trait SheetValues: Send + Sync {
    /// Values currently in `range`; empty when the range has none
    async fn get_values(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, ApiError>;

    async fn clear(&self, sheet_id: &str, range: &str) -> Result<(), ApiError>;

    /// Write `rows` starting at `range`, returning the number of updated cells
    async fn update(&self, sheet_id: &str, range: &str, rows: &[Vec<String>]) -> Result<u64, ApiError>;

    /// Append `rows` after the table at `range`, returning the number of updated cells
    async fn append(&self, sheet_id: &str, range: &str, rows: &[Vec<String>]) -> Result<u64, ApiError>;
}

/// Spreadsheet rows: header first, then one row per `OutputRow`
pub fn sheet_values(rows: &[OutputRow]) -> Vec<Vec<String>> {
    let header: Vec<String> = REPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    let body = rows.iter().map(|row| {
        vec![
            row.order_id.clone(),
            row.total_money.clone(),
            row.line_item_name.clone(),
            row.display_name().to_string(),
            row.rank.clone(),
            row.display_patrol().to_string(),
            row.emergency_contact.clone(),
            row.emergency_contact_phone.clone(),
            row.cell_phone.clone(),
            row.travel_to_campout.clone(),
        ]
    });
    std::iter::once(header).chain(body).collect()
}

/// Write rows to the target sheet, reporting rather than propagating failure.
///
/// Returns `true` when the sheet was written.
pub async fn write_to_sheet<S>(api: &S, target: &SheetTarget, rows: &[OutputRow]) -> bool
where
    S: SheetValues + ?Sized,
{
    match try_write_to_sheet(api, target, rows).await {
        Ok(cells) => {
            info!(
                cells,
                mode = %target.write_mode,
                url = %target.url(),
                "Wrote rows to Google Sheet"
            );
            true
        }
        Err(SheetsError::NoData) => {
            warn!("No data to write to Google Sheets");
            false
        }
        Err(e) => {
            error!(error = %e, sheet_id = %target.sheet_id, "Make sure the sheet ID is correct and the credentials have access to the sheet");
            false
        }
    }
}

async fn try_write_to_sheet<S>(api: &S, target: &SheetTarget, rows: &[OutputRow]) -> Result<u64, SheetsError>
where
    S: SheetValues + ?Sized,
{
    if rows.is_empty() {
        return Err(SheetsError::NoData);
    }

    let values = sheet_values(rows);
    let anchor = format!("{}!A1", target.sheet_name);

    let cells = match target.write_mode {
        WriteMode::Overwrite => {
            api.clear(&target.sheet_id, &target.sheet_name).await?;
            api.update(&target.sheet_id, &anchor, &values).await?
        }
        WriteMode::Append => {
            let has_data = match api.get_values(&target.sheet_id, &anchor).await {
                Ok(existing) => !existing.is_empty(),
                Err(e) => {
                    warn!(error = %e, "Could not read existing sheet data, writing header");
                    false
                }
            };
            // Existing table already has a header row
            let values = if has_data { &values[1..] } else { &values[..] };
            api.append(&target.sheet_id, &anchor, values).await?
        }
    };

    Ok(cells)
}

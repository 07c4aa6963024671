use error_stack::{Report, ResultExt};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    BeneficiaryQuery, DependOnBeneficiaryQuery, DependOnEquipmentQuery, DependOnRentQuery,
    DependOnReturnQuery, EquipmentQuery, RentQuery, ReturnQuery,
};
use kernel::KernelError;

use crate::transfer::{
    BeneficiaryDto, CsvExportDto, EquipmentDto, ExportDto, ExportTarget, RentDto, ReturnDto,
};

const BENEFICIARY_HEADER: &[&str] = &[
    "name",
    "fatherName",
    "gender",
    "dateOfBirth",
    "age",
    "address",
    "contact",
    "notes",
    "createdBy",
    "createdAt",
];

const EQUIPMENT_HEADER: &[&str] = &[
    "name",
    "serialNumber",
    "manufacturingDate",
    "expiryDate",
    "status",
    "source",
    "condition",
    "createdBy",
    "createdAt",
];

const RENT_HEADER: &[&str] = &[
    "beneficiaryId",
    "beneficiaryName",
    "equipmentId",
    "equipmentName",
    "serialNumber",
    "conditionOnGiven",
    "rentDate",
    "createdBy",
    "createdAt",
];

const RETURN_HEADER: &[&str] = &[
    "rentId",
    "beneficiaryId",
    "beneficiaryName",
    "equipmentId",
    "equipmentName",
    "serialNumber",
    "conditionOnGiven",
    "conditionOnReturn",
    "rentDate",
    "returnDate",
    "notes",
    "createdBy",
    "createdAt",
];

type Row = error_stack::Result<Vec<String>, KernelError>;

fn date(value: Date) -> error_stack::Result<String, KernelError> {
    value
        .format(format_description!("[year]-[month]-[day]"))
        .change_context(KernelError::Internal)
}

fn beneficiary_row(dto: BeneficiaryDto) -> Row {
    Ok(vec![
        dto.name,
        dto.father_name,
        dto.gender.to_string(),
        date(dto.date_of_birth)?,
        dto.age.to_string(),
        dto.address,
        dto.contact,
        dto.notes.unwrap_or_default(),
        dto.created_by,
        date(dto.created_at.date())?,
    ])
}

fn equipment_row(dto: EquipmentDto) -> Row {
    Ok(vec![
        dto.name,
        dto.serial_number,
        date(dto.manufacturing_date)?,
        date(dto.expiry_date)?,
        dto.status.to_string(),
        dto.source.to_string(),
        dto.condition.to_string(),
        dto.created_by,
        date(dto.created_at.date())?,
    ])
}

fn rent_row(dto: RentDto) -> Row {
    Ok(vec![
        dto.beneficiary_id.to_string(),
        dto.beneficiary_name,
        dto.equipment_id.to_string(),
        dto.equipment_name,
        dto.serial_number,
        dto.condition_on_given.to_string(),
        date(dto.rent_date)?,
        dto.created_by,
        date(dto.created_at.date())?,
    ])
}

fn return_row(dto: ReturnDto) -> Row {
    Ok(vec![
        dto.rent_id.to_string(),
        dto.beneficiary_id.to_string(),
        dto.beneficiary_name,
        dto.equipment_id.to_string(),
        dto.equipment_name,
        dto.serial_number,
        dto.condition_on_given.to_string(),
        dto.condition_on_return.to_string(),
        date(dto.rent_date)?,
        date(dto.return_date)?,
        dto.notes.unwrap_or_default(),
        dto.created_by,
        date(dto.created_at.date())?,
    ])
}

/// Every field quoted, one header row.
fn write_csv(header: &[&str], rows: &[Vec<String>]) -> error_stack::Result<Vec<u8>, KernelError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    writer
        .write_record(header)
        .change_context(KernelError::Internal)?;
    for row in rows {
        writer
            .write_record(row)
            .change_context(KernelError::Internal)?;
    }
    writer.into_inner().map_err(|e| {
        Report::new(KernelError::Internal).attach_printable(format!("Failed to flush csv: {e}"))
    })
}

#[async_trait::async_trait]
pub trait ExportService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnBeneficiaryQuery
    + DependOnEquipmentQuery
    + DependOnRentQuery
    + DependOnReturnQuery
{
    /// Renders one collection as a csv file named `<stem>_<YYYY-MM-DD>.csv`.
    ///
    /// Returns `None` when the collection is empty, in which case no file is produced.
    async fn export(
        &self,
        dto: &ExportDto,
    ) -> error_stack::Result<Option<CsvExportDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let (header, rows) = match dto.target {
            ExportTarget::Beneficiaries => (
                BENEFICIARY_HEADER,
                self.beneficiary_query()
                    .find_all(&mut connection)
                    .await?
                    .into_iter()
                    .map(|b| beneficiary_row(b.into()))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ExportTarget::Equipments => (
                EQUIPMENT_HEADER,
                self.equipment_query()
                    .find_all(&mut connection)
                    .await?
                    .into_iter()
                    .map(|e| equipment_row(e.into()))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ExportTarget::Rents => (
                RENT_HEADER,
                self.rent_query()
                    .find_all(&mut connection)
                    .await?
                    .into_iter()
                    .map(|r| rent_row(r.into()))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ExportTarget::Returns => (
                RETURN_HEADER,
                self.return_query()
                    .find_all(&mut connection)
                    .await?
                    .into_iter()
                    .map(|r| return_row(r.into()))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        if rows.is_empty() {
            tracing::info!(export = %dto.target, "No data to export");
            return Ok(None);
        }

        let content = write_csv(header, &rows)?;
        let filename = format!(
            "{}_{}.csv",
            dto.target.stem(),
            date(OffsetDateTime::now_utc().date())?
        );
        tracing::debug!(filename = %filename, rows = rows.len(), "Export rendered");
        Ok(Some(CsvExportDto { filename, content }))
    }
}

impl<T> ExportService for T where
    T: DependOnDatabaseConnection
        + DependOnBeneficiaryQuery
        + DependOnEquipmentQuery
        + DependOnRentQuery
        + DependOnReturnQuery
{
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;

    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::fixture::{beneficiary, rented};
    use crate::service::ExportService;
    use crate::transfer::{ExportDto, ExportTarget};

    use super::date;

    #[tokio::test]
    async fn empty_collection_produces_no_file() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        for target in [
            ExportTarget::Beneficiaries,
            ExportTarget::Equipments,
            ExportTarget::Rents,
            ExportTarget::Returns,
        ] {
            assert!(db.export(&ExportDto { target }).await?.is_none());
        }
        Ok(())
    }

    #[tokio::test]
    async fn beneficiaries_are_quoted_without_ids() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        beneficiary(&db, "Amina, Jr.").await;
        let today = date(OffsetDateTime::now_utc().date())?;

        let file = db
            .export(&ExportDto {
                target: ExportTarget::Beneficiaries,
            })
            .await?
            .unwrap();
        assert_eq!(file.filename, format!("all_beneficiaries_{today}.csv"));

        let content = String::from_utf8(file.content).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#""name","fatherName","gender","dateOfBirth","age","address","contact","notes","createdBy","createdAt""#
        );
        assert!(lines[1].starts_with(r#""Amina, Jr.","Yusuf","Female","1985-04-12","#));
        assert!(lines[1].ends_with(&format!(r#","","admin@example.org","{today}""#)));
        Ok(())
    }

    #[tokio::test]
    async fn rents_export_dates_as_calendar_days() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        rented(&db).await;

        let file = db
            .export(&ExportDto {
                target: ExportTarget::Rents,
            })
            .await?
            .unwrap();
        assert!(file.filename.starts_with("all_rents_"));

        let content = String::from_utf8(file.content).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.contains(r#","Wheel Chair","#));
        assert!(row.contains(r#","Ok","2024-05-01","admin@example.org","#));
        Ok(())
    }
}

//! The document composer.
//!
//! Maps one [`ReferralRecord`] onto the letter's ordered block sequence
//! (title, authored date, receiving and referring parties, optional
//! greeting, the patient identity table, and the fixed six-row clinical
//! table) and drives it through a [`DocumentSink`].

use crate::error::ComposeError;
use crate::locale::{CatalogError, MessageCatalog, date_string, keys};
use crate::path::document_path;
use crate::settings::LetterSettings;
use chrono::Local;
use refletter_idf::{Alignment, Block, FontSpec, Table, TableCell, TableRow};
use refletter_model::{Gender, ItemKey, ReferralRecord, TextKey};
use refletter_render_core::DocumentSink;
use refletter_render_lopdf::{LetterSink, PageConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Extension of produced artifacts.
pub const EXT_PDF: &str = "pdf";

const ADDRESS_FONT_SIZE: f32 = 9.0;

/// Font sizes and page geometry for one render. Set once per composer,
/// never mutated mid-render.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterMetrics {
    pub title_font: FontSpec,
    pub body_font: FontSpec,
    /// Address and telephone lines are always set smaller than the body,
    /// independent of other settings.
    pub address_font: FontSpec,
    pub page: PageConfig,
}

impl Default for LetterMetrics {
    fn default() -> Self {
        Self {
            title_font: FontSpec::new(14.0),
            body_font: FontSpec::new(10.0),
            address_font: FontSpec::new(ADDRESS_FONT_SIZE),
            page: PageConfig::a4(),
        }
    }
}

/// Composes referral letters. One instance per render; the composer holds
/// no state across invocations beyond the remembered output path of the
/// last `compose` call.
pub struct LetterComposer {
    catalog: MessageCatalog,
    settings: LetterSettings,
    metrics: LetterMetrics,
    path_to_pdf: Option<PathBuf>,
}

impl LetterComposer {
    /// Builds a composer, verifying the catalog's key set up front.
    pub fn new(catalog: MessageCatalog, settings: LetterSettings) -> Result<Self, CatalogError> {
        catalog.verify()?;
        Ok(Self { catalog, settings, metrics: LetterMetrics::default(), path_to_pdf: None })
    }

    pub fn with_metrics(mut self, metrics: LetterMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The output path resolved by the last [`compose`] call.
    ///
    /// Recorded before any rendering side effect, so it is readable even
    /// when composition subsequently fails. Whether a file at this path is
    /// a complete letter is answered by `compose`'s return value, not by
    /// this accessor; callers get both signals and decide which to trust.
    ///
    /// [`compose`]: LetterComposer::compose
    pub fn resolved_path(&self) -> Option<&Path> {
        self.path_to_pdf.as_deref()
    }

    /// Renders `record` into a PDF under `directory` and returns the
    /// artifact's path.
    pub fn compose(
        &mut self,
        record: &ReferralRecord,
        directory: &Path,
    ) -> Result<PathBuf, ComposeError> {
        let path = document_path(
            directory,
            self.catalog.text(keys::TITLE),
            EXT_PDF,
            &record.patient_name,
            Local::now(),
        );
        self.path_to_pdf = Some(path.clone());

        let file = File::create(&path)?;
        let mut sink = LetterSink::new(BufWriter::new(file), self.metrics.page.clone());
        self.compose_into(record, &mut sink)?;
        Ok(path)
    }

    /// Emits the letter's block sequence into `sink`, in document order.
    pub fn compose_into<S: DocumentSink>(
        &self,
        record: &ReferralRecord,
        sink: &mut S,
    ) -> Result<(), ComposeError> {
        sink.begin()?;
        for block in self.blocks(record) {
            sink.add_block(&block)?;
        }
        sink.finish()?;
        Ok(())
    }

    /// The full block sequence for one record.
    fn blocks(&self, record: &ReferralRecord) -> Vec<Block> {
        let m = &self.metrics;
        let mut blocks = Vec::new();

        blocks.push(Block::paragraph(
            self.catalog.text(keys::TITLE),
            m.title_font,
            Alignment::Center,
        ));
        blocks.push(Block::paragraph(
            date_string(record.started),
            m.body_font,
            Alignment::Right,
        ));
        blocks.push(Block::Spacer);

        // Receiving party, flush left.
        blocks.push(Block::paragraph(record.consultant_hospital.as_str(), m.body_font, Alignment::Left));
        blocks.push(Block::paragraph(record.consultant_dept.as_str(), m.body_font, Alignment::Left));
        blocks.push(Block::paragraph(self.doctor_line(record), m.body_font, Alignment::Left));

        // Referring party, flush right.
        blocks.push(Block::paragraph(record.client_hospital.as_str(), m.body_font, Alignment::Right));
        blocks.push(Block::paragraph(
            format!("{} {}", record.client_doctor, self.catalog.text(keys::SEAL)),
            m.body_font,
            Alignment::Right,
        ));
        blocks.push(Block::paragraph(
            self.client_address_line(record),
            m.address_font,
            Alignment::Right,
        ));
        blocks.push(Block::paragraph(
            self.client_telephone_line(record),
            m.address_font,
            Alignment::Right,
        ));
        blocks.push(Block::Spacer);

        if self.settings.include_greeting {
            blocks.push(Block::paragraph(
                self.catalog.text(keys::GREETINGS),
                m.body_font,
                Alignment::Center,
            ));
        }

        blocks.push(Block::Table(self.patient_table(record)));
        blocks.push(Block::Table(self.clinical_table(record)));
        blocks
    }

    /// `"{name} {honorific} {suffix}"` with the name and suffix segments
    /// conditionally omitted. This line is always emitted; the honorific
    /// stands alone when the doctor's name is absent.
    fn doctor_line(&self, record: &ReferralRecord) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(3);
        if let Some(doctor) = record.consultant_doctor() {
            segments.push(doctor);
        }
        segments.push(self.catalog.text(keys::DOCTOR_TITLE));
        if let Some(suffix) = self.settings.title_suffix() {
            segments.push(suffix);
        }
        segments.join(" ")
    }

    fn client_address_line(&self, record: &ReferralRecord) -> String {
        let mut line = String::new();
        if let Some(zip) = record.client_zip_code() {
            line.push_str(self.catalog.text(keys::ZIP_MARK));
            line.push_str(zip);
            line.push(' ');
        }
        line.push_str(&record.client_address);
        line
    }

    fn client_telephone_line(&self, record: &ReferralRecord) -> String {
        let mut line =
            format!("{}{}", self.catalog.text(keys::TELEPHONE), record.client_telephone);
        if let Some(fax) = record.client_fax() {
            line.push(' ');
            line.push_str(self.catalog.text(keys::FAX));
            line.push_str(fax);
        }
        line
    }

    /// 4-column identity table, weights 20/60/10/10, full width.
    fn patient_table(&self, record: &ReferralRecord) -> Table {
        let body = self.metrics.body_font;
        let t = &self.catalog;

        let birthday = format!(
            "{} ({} {})",
            date_string(record.patient_birthday),
            record.patient_age,
            t.text(keys::AGE),
        );
        let address_label = if self.settings.telephone_with_address {
            t.text(keys::ADDRESS_AND_TELEPHONE)
        } else {
            t.text(keys::ADDRESS)
        };

        Table::new(vec![20, 60, 10, 10])
            .row(
                TableRow::new()
                    .cell(TableCell::new(t.text(keys::PATIENT_NAME), body))
                    .cell(TableCell::new(record.patient_name.as_str(), body))
                    .cell(TableCell::new(t.text(keys::PATIENT_GENDER), body))
                    .cell(TableCell::new(self.sex_string(record.patient_gender), body)),
            )
            .row(
                TableRow::new()
                    .cell(TableCell::new(t.text(keys::BIRTH_DATE), body))
                    .cell(TableCell::spanning(birthday, body, 3)),
            )
            .row(
                TableRow::new()
                    .cell(TableCell::new(address_label, body))
                    .cell(TableCell::spanning(self.patient_address_cell(record), body, 3)),
            )
    }

    /// Zip + address (+ telephone when configured). Absent demographics
    /// render as empty segments, never as an error.
    fn patient_address_cell(&self, record: &ReferralRecord) -> String {
        let mut cell = String::new();
        if let Some(zip) = record.patient_zip_code() {
            cell.push_str(self.catalog.text(keys::ZIP_MARK));
            cell.push_str(zip);
            cell.push(' ');
        }
        if let Some(address) = record.patient_address() {
            cell.push_str(&address.replace(' ', ""));
        }
        if self.settings.telephone_with_address {
            if let Some(telephone) = record.patient_telephone() {
                if !cell.is_empty() {
                    cell.push(' ');
                }
                cell.push_str(self.catalog.text(keys::TELEPHONE));
                cell.push_str(telephone);
            }
        }
        cell
    }

    /// 2-column clinical table, weights 20/80. All six rows are always
    /// present in this order, empty values included.
    fn clinical_table(&self, record: &ReferralRecord) -> Table {
        let body = self.metrics.body_font;
        let t = &self.catalog;
        let kv = |label: String, value: &str| {
            TableRow::new()
                .cell(TableCell::new(label, body))
                .cell(TableCell::new(value, body))
        };

        let past_family =
            format!("{}\n{}", t.text(keys::PAST_ILLNESS), t.text(keys::FAMILY_HISTORY));
        let present_course = format!(
            "{}\n{}\n{}",
            t.text(keys::PRESENT_ILLNESS),
            t.text(keys::TEST_RESULT),
            t.text(keys::PROGRESS_NOTE),
        );

        Table::new(vec![20, 80])
            .row(kv(t.text(keys::DISEASE).into(), record.item_value(ItemKey::Disease)))
            .row(kv(t.text(keys::PURPOSE).into(), record.item_value(ItemKey::Purpose)))
            .row(kv(past_family, record.text_value(TextKey::PastFamily)))
            .row(kv(present_course, record.text_value(TextKey::ClinicalCourse)))
            .row(kv(t.text(keys::MEDICATION).into(), record.text_value(TextKey::Medication)))
            .row(kv(t.text(keys::REMARKS).into(), record.item_value(ItemKey::Remarks)))
    }

    fn sex_string(&self, gender: Gender) -> &str {
        match gender {
            Gender::Male => self.catalog.text(keys::SEX_MALE),
            Gender::Female => self.catalog.text(keys::SEX_FEMALE),
            Gender::Unknown => self.catalog.text(keys::SEX_UNKNOWN),
        }
    }
}

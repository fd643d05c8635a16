//! Typed lookups over fetched Scholar pages.
//!
//! Everything here turns raw markup into owned values (identity fields,
//! record links, field/value pairs); the classification engine never sees
//! HTML.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::common::{FieldValuePair, ProfileIdentity, RecordRef};

const SCHOLAR_HOST: &str = "https://scholar.google.com";

lazy_static! {
    static ref NAME_SEL: Selector = Selector::parse("#gsc_prf_i").expect("selector");
    static ref STATS_ROW_SEL: Selector = Selector::parse("#gsc_rsb_st tbody tr").expect("selector");
    static ref STATS_CELL_SEL: Selector = Selector::parse("td.gsc_rsb_std").expect("selector");
    static ref GRAPH_YEAR_SEL: Selector = Selector::parse("span.gsc_g_t").expect("selector");
    static ref GRAPH_VALUE_SEL: Selector =
        Selector::parse("a.gsc_g_a span.gsc_g_al").expect("selector");
    static ref RECORD_LINK_SEL: Selector = Selector::parse("a.gsc_a_at").expect("selector");
    static ref DETAIL_ROW_SEL: Selector = Selector::parse("div.gs_scl").expect("selector");
    static ref DETAIL_FIELD_SEL: Selector = Selector::parse("div.gsc_oci_field").expect("selector");
    static ref DETAIL_VALUE_SEL: Selector = Selector::parse("div.gsc_oci_value").expect("selector");
    static ref UPDATED_LINK_SEL: Selector =
        Selector::parse("a#updated-profile-link").expect("selector");
}

/// A profile landing page reduced to owned data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePage {
    pub identity: ProfileIdentity,
    /// Record links in listing order (descending publication date on the
    /// canonical listing request).
    pub records: Vec<RecordRef>,
}

/// Parse a profile landing page.
///
/// Returns `None` when the page carries no profile name container, which is
/// what a block page or an unknown user looks like.
pub fn parse_profile_page(html: &str, window_year: i32) -> Option<ProfilePage> {
    let doc = Html::parse_document(html);

    let name = doc.select(&NAME_SEL).next().map(element_text)?;

    let mut identity = ProfileIdentity {
        name,
        year_citations: graph_year_citations(&doc, window_year),
        ..Default::default()
    };

    for row in doc.select(&STATS_ROW_SEL) {
        let header = element_text(row).to_lowercase();
        let cells: Vec<u64> = row
            .select(&STATS_CELL_SEL)
            .filter_map(|cell| parse_count(&element_text(cell)))
            .collect();
        // Cells are (all, since) per metric row.
        if let [all, since] = cells.as_slice() {
            if header.starts_with("citations") {
                identity.citations_all = *all;
            } else if header.starts_with("h-index") {
                identity.h_index_all = *all as u32;
                identity.h_index_since = *since as u32;
            }
        }
    }

    let records = doc
        .select(&RECORD_LINK_SEL)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            Some(RecordRef {
                title: element_text(link),
                url: absolute_url(href),
            })
        })
        .collect();

    Some(ProfilePage { identity, records })
}

/// Extract the ordered field/value pairs from a record detail page.
pub fn parse_record_fields(html: &str) -> Vec<FieldValuePair> {
    let doc = Html::parse_document(html);
    doc.select(&DETAIL_ROW_SEL)
        .filter_map(|row| {
            let label = row.select(&DETAIL_FIELD_SEL).next()?;
            let value = row
                .select(&DETAIL_VALUE_SEL)
                .next()
                .map(element_text)
                .unwrap_or_default();
            Some(FieldValuePair::new(element_text(label), value))
        })
        .collect()
}

/// Href of the moved-profile link, when the page advertises one.
pub fn updated_profile_link(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let href = doc
        .select(&UPDATED_LINK_SEL)
        .next()?
        .value()
        .attr("href")?;
    Some(absolute_url(href))
}

/// Citation count for one year from the profile's bar graph, aligned by
/// index as the year/value span lists appear.
fn graph_year_citations(doc: &Html, year: i32) -> Option<u64> {
    let years: Vec<String> = doc.select(&GRAPH_YEAR_SEL).map(element_text).collect();
    let values: Vec<String> = doc.select(&GRAPH_VALUE_SEL).map(element_text).collect();

    let index = years.iter().position(|y| y == &year.to_string())?;
    parse_count(values.get(index)?)
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_count(text: &str) -> Option<u64> {
    text.replace(',', "").parse().ok()
}

fn absolute_url(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", SCHOLAR_HOST, href)
    }
}

//! Declarative PDF document definitions.
//!
//! The server does not rasterize PDFs itself; it hands a JSON document
//! definition (page setup, content nodes, named styles) to the rendering
//! frontend. Builders below produce the definitions for the constancia
//! certificate, the product sheets, and the monthly report.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::constancia::Constancia;
use crate::domain::product::Product;
use crate::dto::report::{MonthlyReportRow, ReportTotals};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_margins: Option<[i32; 4]>,
    pub content: Vec<Node>,
    pub styles: BTreeMap<&'static str, Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_style: Option<DefaultStyle>,
}

/// One content node. Either a text block, a multi-column row, or a table.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_rows: Option<u32>,
    pub body: Vec<Vec<Node>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<[i32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DefaultStyle {
    pub font: &'static str,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn styled(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: Some(text.into()),
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn columns(columns: Vec<Node>) -> Self {
        Self {
            columns: Some(columns),
            ..Self::default()
        }
    }

    fn aligned(mut self, alignment: &'static str) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

fn table_row(cells: &[&str]) -> Vec<Node> {
    cells.iter().map(|cell| Node::text(*cell)).collect()
}

fn header_row(cells: &[&str]) -> Vec<Node> {
    cells
        .iter()
        .map(|cell| Node::styled(*cell, "tableHeader"))
        .collect()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Download filename for an approved certificate.
pub fn certificate_filename(constancia: &Constancia) -> String {
    format!(
        "constancia_{}_{}.pdf",
        constancia.tipo.as_str().to_lowercase(),
        constancia.public_id
    )
}

/// A4 certificate for an approved constancia.
pub fn certificate(constancia: &Constancia, issued_on: NaiveDate) -> DocumentDefinition {
    let content = vec![
        Node::styled("CONSTANCIA", "header"),
        Node::text("\n\n"),
        Node::styled("Por medio de la presente se certifica que:", "subheader"),
        Node::text("\n"),
        Node::styled(constancia.full_name(), "nombre"),
        Node::text("\n\n"),
        Node::styled(
            format!(
                "Con documento de identidad: {}",
                constancia.documento.as_str()
            ),
            "documento",
        ),
        Node::text("\n\n"),
        Node::styled(
            format!(
                "Solicita constancia de {} por motivo de:",
                constancia.tipo.as_str().to_lowercase()
            ),
            "motivo",
        ),
        Node::styled(constancia.motivo.as_str(), "motivoTexto"),
        Node::text("\n\n\n"),
        Node::columns(vec![
            Node::styled(
                format!("Fecha de emisión: {}", format_date(issued_on)),
                "fecha",
            ),
            Node::styled(format!("Folio: {}", constancia.public_id), "folio"),
        ]),
        Node::text("\n\n\n\n"),
        Node::columns(vec![
            Node::text("______________________").aligned("center"),
            Node::text("______________________").aligned("center"),
        ]),
        Node::columns(vec![
            Node::styled("Firma del Solicitante", "firma").aligned("center"),
            Node::styled("Sello y Firma", "firma").aligned("center"),
        ]),
    ];

    let styles = BTreeMap::from([
        (
            "header",
            Style {
                font_size: Some(22),
                bold: Some(true),
                alignment: Some("center"),
                ..Style::default()
            },
        ),
        (
            "subheader",
            Style {
                font_size: Some(16),
                alignment: Some("center"),
                ..Style::default()
            },
        ),
        (
            "nombre",
            Style {
                font_size: Some(14),
                bold: Some(true),
                alignment: Some("center"),
                ..Style::default()
            },
        ),
        (
            "documento",
            Style {
                font_size: Some(12),
                alignment: Some("center"),
                ..Style::default()
            },
        ),
        (
            "motivo",
            Style {
                font_size: Some(12),
                ..Style::default()
            },
        ),
        (
            "motivoTexto",
            Style {
                font_size: Some(12),
                italic: Some(true),
                alignment: Some("justify"),
                ..Style::default()
            },
        ),
        (
            "fecha",
            Style {
                font_size: Some(10),
                ..Style::default()
            },
        ),
        (
            "folio",
            Style {
                font_size: Some(10),
                color: Some("grey"),
                ..Style::default()
            },
        ),
        (
            "firma",
            Style {
                font_size: Some(10),
                margin: Some([0, 5, 0, 0]),
                ..Style::default()
            },
        ),
    ]);

    DocumentDefinition {
        page_size: Some("A4"),
        page_margins: Some([40, 60, 40, 60]),
        content,
        styles,
        default_style: Some(DefaultStyle { font: "Helvetica" }),
    }
}

/// Detail sheet for one product.
pub fn product_detail(product: &Product) -> DocumentDefinition {
    let content = vec![
        Node::styled("Detalle Producto", "header"),
        Node {
            table: Some(Table {
                header_rows: None,
                body: vec![
                    table_row(&["Nombre", &product.name]),
                    table_row(&["Precio", &format!("${:.2}", product.price)]),
                    table_row(&["Unidades Vendidas", &product.sold_units.to_string()]),
                    table_row(&["Ganancia Vendidas", &format!("${:.2}", product.profit())]),
                ],
            }),
            ..Node::default()
        },
    ];

    DocumentDefinition {
        page_size: None,
        page_margins: None,
        content,
        styles: sheet_styles(),
        default_style: None,
    }
}

/// Summary table of all of a user's products with the total profit.
pub fn products_summary(
    owner_name: &str,
    products: &[Product],
    issued_on: NaiveDate,
) -> DocumentDefinition {
    let mut body = vec![header_row(&[
        "N*",
        "Nombre",
        "Precio",
        "Unidades Vendidas",
        "Ganancias Vendidas",
    ])];
    for (index, product) in products.iter().enumerate() {
        body.push(table_row(&[
            &(index + 1).to_string(),
            &product.name,
            &format!("${:.2}", product.price),
            &product.sold_units.to_string(),
            &format!("${:.2}", product.profit()),
        ]));
    }

    let total: f64 = products.iter().map(Product::profit).sum();

    let content = vec![
        Node::styled("Resumen de Productos", "header"),
        Node::styled(format!("Generado por: {owner_name}"), "subheader"),
        Node::styled(format!("Fecha: {}", format_date(issued_on)), "subheader"),
        Node {
            table: Some(Table {
                header_rows: Some(1),
                body,
            }),
            ..Node::default()
        },
        Node::styled(
            format!("Ganancias Vendidas en total: ${total:.2}"),
            "totalProfit",
        ),
    ];

    DocumentDefinition {
        page_size: None,
        page_margins: None,
        content,
        styles: sheet_styles(),
        default_style: None,
    }
}

/// Monthly report: one table row per month plus annual totals.
pub fn monthly_report(
    rows: &[MonthlyReportRow],
    totals: &ReportTotals,
    issued_on: NaiveDate,
) -> DocumentDefinition {
    let mut body = vec![header_row(&[
        "Mes",
        "Total",
        "Pendientes",
        "Aprobadas",
        "Rechazadas",
    ])];
    for row in rows {
        body.push(table_row(&[
            &row.mes,
            &row.total.to_string(),
            &row.pendientes.to_string(),
            &row.aprobadas.to_string(),
            &row.rechazadas.to_string(),
        ]));
    }

    let content = vec![
        Node::styled("INFORME DE CONSTANCIAS POR MES", "header"),
        Node::styled(
            format!("Fecha de generación: {}", format_date(issued_on)),
            "subheader",
        ),
        Node {
            table: Some(Table {
                header_rows: Some(1),
                body,
            }),
            ..Node::default()
        },
        Node::styled("\nResumen Anual", "subheader"),
        Node::text(format!("\nTotal de Constancias: {}", totals.total)),
        Node::text(format!("\nTotal Aprobadas: {}", totals.aprobadas)),
        Node::text(format!("\nTotal Pendientes: {}", totals.pendientes)),
        Node::text(format!("\nTotal Rechazadas: {}", totals.rechazadas)),
    ];

    DocumentDefinition {
        page_size: Some("A4"),
        page_margins: Some([40, 60, 40, 60]),
        content,
        styles: sheet_styles(),
        default_style: None,
    }
}

fn sheet_styles() -> BTreeMap<&'static str, Style> {
    BTreeMap::from([
        (
            "header",
            Style {
                font_size: Some(18),
                bold: Some(true),
                margin: Some([0, 0, 0, 10]),
                ..Style::default()
            },
        ),
        (
            "subheader",
            Style {
                font_size: Some(14),
                margin: Some([0, 0, 0, 5]),
                ..Style::default()
            },
        ),
        (
            "totalProfit",
            Style {
                font_size: Some(14),
                bold: Some(true),
                margin: Some([0, 10, 0, 0]),
                ..Style::default()
            },
        ),
        (
            "tableHeader",
            Style {
                bold: Some(true),
                ..Style::default()
            },
        ),
    ])
}

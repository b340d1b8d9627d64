//! End-to-end analysis over loaded source tables.

use std::collections::BTreeMap;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use ecom_ingest::SourceTables;
use ecom_model::{AnalysisOptions, AnalysisSummary, ImputationReport, TableShape};

use crate::aggregate::{
    PaymentDistribution, category_demand_frame, geo_distribution, payment_distribution,
    rank_categories,
};
use crate::error::Result;
use crate::impute::{Imputed, impute_missing};
use crate::join::{attach_category_translation, build_merged_table, build_order_items_table};
use crate::segment::{SpendSegmentation, segment_order_items};

/// Output of [`run_analysis`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub options: AnalysisOptions,
    pub sources: BTreeMap<String, TableShape>,
    pub merged: TableShape,
    /// Imputed merged table, before the category translation join.
    pub cleaned: DataFrame,
    pub imputation: ImputationReport,
    pub top_categories: Vec<(String, u32)>,
    pub category_demand: DataFrame,
    pub geo_distribution: DataFrame,
    pub payments: PaymentDistribution,
    pub segmentation: SpendSegmentation,
}

/// A named table handed to presentation and export.
#[derive(Debug, Clone, Copy)]
pub struct DerivedTable<'a> {
    /// File stem used on export.
    pub name: &'static str,
    pub title: &'static str,
    pub data: &'a DataFrame,
}

pub fn shape_of(df: &DataFrame) -> TableShape {
    TableShape {
        rows: df.height(),
        columns: df.width(),
    }
}

impl AnalysisReport {
    /// Derived tables in presentation order. The cleaned table is not included.
    pub fn derived_tables(&self) -> Vec<DerivedTable<'_>> {
        vec![
            DerivedTable {
                name: "top_categories",
                title: "Top product categories",
                data: &self.category_demand,
            },
            DerivedTable {
                name: "geo_distribution",
                title: "Orders per category and city",
                data: &self.geo_distribution,
            },
            DerivedTable {
                name: "payment_types",
                title: "Payment methods",
                data: &self.payments.by_type,
            },
            DerivedTable {
                name: "payment_by_state",
                title: "Payment methods by state",
                data: &self.payments.by_state,
            },
            DerivedTable {
                name: "payment_by_city",
                title: "Payment methods by city",
                data: &self.payments.by_city,
            },
            DerivedTable {
                name: "clustered_order_items",
                title: "Order items by spend segment",
                data: &self.segmentation.clustered,
            },
            DerivedTable {
                name: "cluster_counts",
                title: "Spend segment sizes",
                data: &self.segmentation.counts,
            },
        ]
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            options: self.options.clone(),
            sources: self.sources.clone(),
            merged: self.merged,
            cleaned: shape_of(&self.cleaned),
            imputation: self.imputation.clone(),
            top_categories: self.top_categories.clone(),
            thresholds: self.segmentation.thresholds,
            segments: self
                .segmentation
                .tally
                .iter()
                .map(|(segment, count)| (segment.label().to_string(), *count))
                .collect(),
        }
    }
}

/// Join, impute, aggregate and segment.
pub fn run_analysis(tables: &SourceTables, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let merged = info_span!("join").in_scope(|| -> Result<DataFrame> {
        let start = Instant::now();
        let merged = build_merged_table(tables)?;
        info!(
            orders = tables.orders.height(),
            rows = merged.height(),
            columns = merged.width(),
            duration_ms = start.elapsed().as_millis(),
            "join complete"
        );
        Ok(merged)
    })?;
    let merged_shape = shape_of(&merged);

    let Imputed {
        data: cleaned,
        report: imputation,
    } = info_span!("impute").in_scope(|| -> Result<Imputed> {
        let start = Instant::now();
        let imputed = impute_missing(&merged, options.drop_threshold)?;
        info!(
            dropped = imputed.report.dropped_columns().len(),
            filled = imputed.report.filled_columns().len(),
            filled_cells = imputed.report.filled_cells(),
            columns = imputed.data.width(),
            duration_ms = start.elapsed().as_millis(),
            "imputation complete"
        );
        Ok(imputed)
    })?;

    let (top_categories, category_demand, geo, payments) =
        info_span!("aggregate").in_scope(|| -> Result<_> {
            let start = Instant::now();
            let translated = attach_category_translation(&cleaned, &tables.category_translation)?;
            let top_categories = rank_categories(&translated, options.top_categories)?;
            let category_demand = category_demand_frame(&top_categories)?;
            let names: Vec<String> = top_categories.iter().map(|(name, _)| name.clone()).collect();
            let geo = geo_distribution(&translated, &names)?;
            let payments = payment_distribution(&cleaned, options.city_limit)?;
            info!(
                categories = top_categories.len(),
                geo_rows = geo.height(),
                payment_types = payments.by_type.height(),
                duration_ms = start.elapsed().as_millis(),
                "aggregation complete"
            );
            Ok((top_categories, category_demand, geo, payments))
        })?;

    let segmentation = info_span!("segment").in_scope(|| -> Result<SpendSegmentation> {
        let start = Instant::now();
        let order_items = build_order_items_table(tables)?;
        let segmentation = segment_order_items(&order_items, options.missing_payment)?;
        info!(
            rows = segmentation.clustered.height(),
            q1 = segmentation.thresholds.map(|t| t.q1),
            q3 = segmentation.thresholds.map(|t| t.q3),
            duration_ms = start.elapsed().as_millis(),
            "segmentation complete"
        );
        Ok(segmentation)
    })?;

    Ok(AnalysisReport {
        options: options.clone(),
        sources: tables.shapes(),
        merged: merged_shape,
        cleaned,
        imputation,
        top_categories,
        category_demand,
        geo_distribution: geo,
        payments,
        segmentation,
    })
}

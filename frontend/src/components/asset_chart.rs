use leptos::*;

use crate::assets::{
    format::{format_brl, format_short_date},
    types::AssetRecord,
};

const CHART_WIDTH: f64 = 900.0;
const CHART_HEIGHT: f64 = 340.0;
const MARGIN_LEFT: f64 = 88.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 40.0;
const PLOT_WIDTH: f64 = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
const GRID_LINES: usize = 4;

/// Price evolution of the records currently shown in the table.
#[component]
pub fn AssetChart(#[prop(into)] records: Signal<Vec<AssetRecord>>) -> impl IntoView {
    let geometry = create_memo(move |_| {
        records.with(|records| compute_chart_geometry(records, PLOT_WIDTH, PLOT_HEIGHT))
    });
    let hovered = create_rw_signal(None::<usize>);

    move || {
        geometry.get().map(|geometry| {
            let grid = grid_levels(geometry.min_price, geometry.max_price, GRID_LINES);
            let points = geometry.points.clone();
            let tooltip_points = geometry.points.clone();
            let column_width = geometry.column_width;

            view! {
                <section class="asset-chart">
                    <h2>"Price Evolution"</h2>
                    <ul class="asset-chart__legend">
                        {geometry.series.iter().map(|series| view! {
                            <li class=format!("asset-chart__legend-item {}", series.class)>{series.label}</li>
                        }).collect_view()}
                    </ul>
                    <div class="asset-chart__canvas" on:mouseleave=move |_| hovered.set(None)>
                        <svg
                            viewBox=format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)
                            width="100%"
                            class="asset-chart__svg"
                        >
                            <g transform=format!("translate({},{})", MARGIN_LEFT, MARGIN_TOP)>
                                {grid.into_iter().map(|(y, price)| view! {
                                    <line class="asset-chart__grid" x1=0 x2=PLOT_WIDTH y1=y y2=y />
                                    <text class="asset-chart__y-label" x="-8" y=y text-anchor="end" dominant-baseline="middle">
                                        {format_brl(price)}
                                    </text>
                                }).collect_view()}
                                {points.iter().map(|point| view! {
                                    <text
                                        class="asset-chart__x-label"
                                        x=point.x
                                        y={PLOT_HEIGHT + 18.0}
                                        text-anchor="end"
                                        transform=format!("rotate(-45 {:.2} {:.2})", point.x, PLOT_HEIGHT + 18.0)
                                    >
                                        {point.label.clone()}
                                    </text>
                                }).collect_view()}
                                {geometry.series.iter().map(|series| view! {
                                    <polyline
                                        class=format!("asset-chart__line {}", series.class)
                                        points=series.points.clone()
                                    />
                                }).collect_view()}
                                {points.iter().enumerate().map(|(index, point)| view! {
                                    <rect
                                        class="asset-chart__hover"
                                        class:active=move || hovered.get() == Some(index)
                                        x={point.x - column_width / 2.0}
                                        y=0
                                        width=column_width
                                        height=PLOT_HEIGHT
                                        on:mouseenter=move |_| hovered.set(Some(index))
                                    />
                                }).collect_view()}
                            </g>
                        </svg>
                        {move || {
                            hovered.get().and_then(|index| tooltip_points.get(index).cloned()).map(|point| {
                                let left = (MARGIN_LEFT + point.x) / CHART_WIDTH * 100.0;
                                view! {
                                    <div class="asset-chart__tooltip" style=format!("left: {left:.2}%")>
                                        <strong>{point.label.clone()}</strong>
                                        {tooltip_lines(&point).into_iter().map(|(label, value)| view! {
                                            <span>{label}": "{value}</span>
                                        }).collect_view()}
                                    </div>
                                }
                            })
                        }}
                    </div>
                </section>
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ChartPoint {
    label: String,
    x: f64,
    open: f64,
    close: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    label: &'static str,
    class: &'static str,
    points: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ChartGeometry {
    points: Vec<ChartPoint>,
    series: Vec<ChartSeries>,
    min_price: f64,
    max_price: f64,
    column_width: f64,
}

fn compute_chart_geometry(
    records: &[AssetRecord],
    width: f64,
    height: f64,
) -> Option<ChartGeometry> {
    if records.is_empty() || width <= 0.0 || height <= 0.0 {
        return None;
    }

    // Records arrive newest first; the chart reads left to right in time.
    let ordered: Vec<&AssetRecord> = records.iter().rev().collect();

    let prices = ordered.iter().flat_map(|record| {
        [
            record.preco_abertura,
            record.preco_ultimo,
            record.preco_min,
            record.preco_max,
        ]
    });
    let (mut min_price, mut max_price) = prices
        .filter(|price| price.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), price| {
            (lo.min(price), hi.max(price))
        });
    if !min_price.is_finite() || !max_price.is_finite() {
        return None;
    }
    if (max_price - min_price).abs() < f64::EPSILON {
        min_price -= 1.0;
        max_price += 1.0;
    }
    let price_span = max_price - min_price;

    let count = ordered.len();
    let step = if count > 1 {
        width / (count - 1) as f64
    } else {
        width
    };
    let x_at = |index: usize| {
        if count > 1 {
            index as f64 * step
        } else {
            width / 2.0
        }
    };
    let y_at = |price: f64| height - ((price - min_price) / price_span) * height;

    let points: Vec<ChartPoint> = ordered
        .iter()
        .enumerate()
        .map(|(index, record)| ChartPoint {
            label: format_short_date(record.data_pregao),
            x: x_at(index),
            open: record.preco_abertura,
            close: record.preco_ultimo,
            min: record.preco_min,
            max: record.preco_max,
        })
        .collect();

    let polyline = |pick: fn(&ChartPoint) -> f64| {
        points
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, y_at(pick(point))))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let series = vec![
        ChartSeries {
            label: "Open",
            class: "series--open",
            points: polyline(|point| point.open),
        },
        ChartSeries {
            label: "Close",
            class: "series--close",
            points: polyline(|point| point.close),
        },
        ChartSeries {
            label: "Min",
            class: "series--min",
            points: polyline(|point| point.min),
        },
        ChartSeries {
            label: "Max",
            class: "series--max",
            points: polyline(|point| point.max),
        },
    ];

    Some(ChartGeometry {
        points,
        series,
        min_price,
        max_price,
        column_width: step.min(width),
    })
}

/// Evenly spaced horizontal grid lines as `(y, price)` pairs, bottom to top.
fn grid_levels(min_price: f64, max_price: f64, lines: usize) -> Vec<(f64, f64)> {
    let lines = lines.max(1);
    (0..=lines)
        .map(|step| {
            let ratio = step as f64 / lines as f64;
            let price = min_price + (max_price - min_price) * ratio;
            (PLOT_HEIGHT - ratio * PLOT_HEIGHT, price)
        })
        .collect()
}

fn tooltip_lines(point: &ChartPoint) -> [(&'static str, String); 4] {
    [
        ("Open", format_brl(point.open)),
        ("Close", format_brl(point.close)),
        ("Min", format_brl(point.min)),
        ("Max", format_brl(point.max)),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(day: u32, open: f64, close: f64, min: f64, max: f64) -> AssetRecord {
        AssetRecord {
            id: i64::from(day),
            ticker: "PETR4".into(),
            data_pregao: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            preco_abertura: open,
            preco_min: min,
            preco_max: max,
            preco_ultimo: close,
            quantidade_negociada: 1_000.0,
        }
    }

    #[test]
    fn empty_records_render_nothing() {
        assert!(compute_chart_geometry(&[], 100.0, 50.0).is_none());
    }

    #[test]
    fn points_are_reversed_into_chronological_order() {
        let records = vec![
            record(3, 38.0, 38.4, 37.5, 38.9),
            record(2, 37.0, 37.8, 36.9, 38.1),
        ];

        let geometry = compute_chart_geometry(&records, 100.0, 50.0).expect("geometry");
        let labels: Vec<_> = geometry
            .points
            .iter()
            .map(|point| point.label.as_str())
            .collect();
        assert_eq!(labels, vec!["02/01", "03/01"]);
        assert_eq!(geometry.points[0].x, 0.0);
        assert_eq!(geometry.points[1].x, 100.0);
        assert_eq!(geometry.min_price, 36.9);
        assert_eq!(geometry.max_price, 38.9);
    }

    #[test]
    fn four_series_span_the_price_range() {
        let records = vec![
            record(3, 12.0, 11.0, 10.0, 14.0),
            record(2, 10.0, 12.0, 10.0, 12.0),
        ];

        let geometry = compute_chart_geometry(&records, 100.0, 50.0).expect("geometry");
        let labels: Vec<_> = geometry.series.iter().map(|series| series.label).collect();
        assert_eq!(labels, vec!["Open", "Close", "Min", "Max"]);
        // Oldest record opens at the bottom of the range, newest max at the top.
        assert!(geometry.series[0].points.starts_with("0.00,50.00"));
        assert!(geometry.series[3].points.ends_with("100.00,0.00"));
    }

    #[test]
    fn single_flat_record_is_centered() {
        let records = [record(5, 10.0, 10.0, 10.0, 10.0)];
        let geometry = compute_chart_geometry(&records, 100.0, 50.0).expect("geometry");
        assert_eq!(geometry.points[0].x, 50.0);
        assert_eq!(geometry.series[0].points, "50.00,25.00");
    }

    #[test]
    fn tooltip_formats_values_as_currency() {
        let records = [record(5, 38.5, 39.0, 38.0, 39.25)];
        let geometry = compute_chart_geometry(&records, 100.0, 50.0).expect("geometry");
        let lines = tooltip_lines(&geometry.points[0]);
        assert_eq!(lines[0], ("Open", "R$\u{a0}38,50".to_string()));
        assert_eq!(lines[3], ("Max", "R$\u{a0}39,25".to_string()));
    }

    #[test]
    fn grid_levels_cover_min_to_max() {
        let levels = grid_levels(10.0, 20.0, 4);
        assert_eq!(levels.len(), 5);
        assert_eq!(levels.first().unwrap(), &(PLOT_HEIGHT, 10.0));
        assert_eq!(levels.last().unwrap(), &(0.0, 20.0));
    }
}

use leptos::{ev, *};

use crate::assets::{
    format::{format_brl, format_date, format_quantity, has_next_page, pagination_label},
    types::{AssetPage, AssetRecord},
};
use crate::config::PAGE_SIZE_OPTIONS;

/// One page of records with pagination controls. Holds no state of its own.
#[component]
pub fn AssetTable(
    #[prop(into)] data: Signal<Option<AssetPage>>,
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] page_size: Signal<u32>,
    #[prop(into)] on_page_change: Callback<u32>,
    #[prop(into)] on_page_size_change: Callback<u32>,
) -> impl IntoView {
    let show_rows = move || data.with(|data| has_rows(data.as_ref()));
    let rows = move || {
        data.with(|data| {
            data.as_ref()
                .map(|page| page.content.clone())
                .unwrap_or_default()
        })
    };
    let total = move || data.with(|data| data.as_ref().map(|page| page.total).unwrap_or(0));

    let on_size_change = move |ev: ev::Event| match event_target_value(&ev).parse::<u32>() {
        Ok(size) => on_page_size_change.call(size),
        Err(err) => log::warn!("ignoring invalid page size: {err}"),
    };

    view! {
        <Show
            when=show_rows
            fallback=|| view! {
                <section class="asset-table asset-table--empty">
                    <p>"No results found"</p>
                </section>
            }
        >
            <section class="asset-table">
                <table>
                    <thead>
                        <tr>
                            <th>"Ticker"</th>
                            <th>"Date"</th>
                            <th class="numeric">"Open"</th>
                            <th class="numeric">"Min"</th>
                            <th class="numeric">"Max"</th>
                            <th class="numeric">"Close"</th>
                            <th class="numeric">"Volume"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|record| record.id
                            children=move |record: AssetRecord| {
                                let cells = RowCells::from(&record);
                                view! {
                                    <tr>
                                        <td><strong>{cells.ticker}</strong></td>
                                        <td>{cells.date}</td>
                                        <td class="numeric">{cells.open}</td>
                                        <td class="numeric">{cells.min}</td>
                                        <td class="numeric">{cells.max}</td>
                                        <td class="numeric"><strong>{cells.close}</strong></td>
                                        <td class="numeric">{cells.volume}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <footer class="asset-table__pagination">
                    <label>
                        <span>"Rows per page:"</span>
                        <select on:change=on_size_change>
                            {PAGE_SIZE_OPTIONS
                                .into_iter()
                                .map(|size| view! {
                                    <option
                                        value=size.to_string()
                                        selected=move || page_size.get() == size
                                    >
                                        {size}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <span class="asset-table__range">
                        {move || pagination_label(page.get(), page_size.get(), total())}
                    </span>
                    <button
                        class="asset-table__nav"
                        disabled=move || page.get() == 0
                        on:click=move |_| {
                            let current = page.get_untracked();
                            if current > 0 {
                                on_page_change.call(current - 1);
                            }
                        }
                    >
                        "‹"
                    </button>
                    <button
                        class="asset-table__nav"
                        disabled=move || !has_next_page(page.get(), page_size.get(), total())
                        on:click=move |_| on_page_change.call(page.get_untracked() + 1)
                    >
                        "›"
                    </button>
                </footer>
            </section>
        </Show>
    }
}

/// Rows exist only when the current page carries records, whatever `total` says.
fn has_rows(data: Option<&AssetPage>) -> bool {
    data.is_some_and(|page| !page.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
struct RowCells {
    ticker: String,
    date: String,
    open: String,
    min: String,
    max: String,
    close: String,
    volume: String,
}

impl From<&AssetRecord> for RowCells {
    fn from(record: &AssetRecord) -> Self {
        RowCells {
            ticker: record.ticker.clone(),
            date: format_date(record.data_pregao),
            open: format_brl(record.preco_abertura),
            min: format_brl(record.preco_min),
            max: format_brl(record.preco_max),
            close: format_brl(record.preco_ultimo),
            volume: format_quantity(record.quantidade_negociada),
        }
    }
}

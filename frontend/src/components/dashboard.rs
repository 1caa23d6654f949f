use std::rc::Rc;

use shared::{format_currency, AppConfig, DashboardData};
use yew::prelude::*;

use super::budget_list::BudgetList;
use super::chart_canvas::ChartCanvas;
use super::transaction_table::TransactionTable;
use crate::charts::ChartRequest;

/// Canvas ids the dashboard charts are drawn on.
pub const CATEGORY_CHART_ID: &str = "categoryChart";
pub const CASH_FLOW_CHART_ID: &str = "cashFlowChart";

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub data: Rc<DashboardData>,
    pub config: Rc<AppConfig>,
}

#[derive(Properties, PartialEq)]
struct SummaryCardProps {
    label: AttrValue,
    amount: f64,
    class: Classes,
}

#[function_component(SummaryCard)]
fn summary_card(props: &SummaryCardProps) -> Html {
    html! {
        <div class={classes!("card", "summary-card", props.class.clone())}>
            <span class="summary-label">{props.label.clone()}</span>
            <span class="summary-amount">{format_currency(props.amount)}</span>
        </div>
    }
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let data = &props.data;

    let category_request = ChartRequest::Doughnut {
        labels: data.category_labels.clone(),
        values: data.category_values.clone(),
    };
    let cash_flow_request = ChartRequest::Line {
        labels: data.months.clone(),
        income: data.incomes.clone(),
        expense: data.expenses.clone(),
    };

    let net_class = if data.is_net_positive() { "positive" } else { "negative" };

    html! {
        <div class="dashboard">
            <div class="summary-grid">
                <SummaryCard
                    label="Income this month"
                    amount={data.mtd_income}
                    class={classes!("income")}
                />
                <SummaryCard
                    label="Expenses this month"
                    amount={data.mtd_expense}
                    class={classes!("expense")}
                />
                <SummaryCard label="Net" amount={data.net} class={classes!("net", net_class)} />
            </div>

            <div class="chart-grid">
                <ChartCanvas
                    mount_id={CATEGORY_CHART_ID}
                    request={category_request}
                    title={Some(AttrValue::from("Spending by Category"))}
                />
                <ChartCanvas
                    mount_id={CASH_FLOW_CHART_ID}
                    request={cash_flow_request}
                    title={Some(AttrValue::from("Cash Flow"))}
                />
            </div>

            <BudgetList usages={data.budget_usages.clone()} config={Rc::clone(&props.config)} />
            <TransactionTable transactions={data.recent_transactions.clone()} />
        </div>
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use crate::services::dom::{document, query_all};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn next_tick() {
        // Yew renders on its scheduler; give it a turn
        gloo::timers::future::TimeoutFuture::new(20).await;
    }

    #[wasm_bindgen_test]
    async fn test_dashboard_renders_sections() {
        let data = DashboardData::from_json(
            r#"{
                "mtdIncome": 5200, "mtdExpense": 3120.45, "net": 2079.55,
                "budgetUsages": [
                    {"categoryName": "Groceries", "spent": 460, "limit": 500, "percent": 92},
                    {"categoryName": "Fun", "spent": 20, "limit": 100, "percent": 20}
                ],
                "recentTransactions": [
                    {"date": "2024-03-05", "merchant": "Corner Market",
                     "categoryType": "EXPENSE", "amount": 42.1}
                ]
            }"#,
        )
        .unwrap();
        let root = document().create_element("div").unwrap();
        document().body().unwrap().append_child(&root).unwrap();

        let props = DashboardProps { data: Rc::new(data), config: Rc::new(AppConfig::default()) };
        let _handle = yew::Renderer::<Dashboard>::with_root_and_props(root.clone(), props).render();
        next_tick().await;

        let amounts: Vec<String> = query_all(&root, ".summary-amount")
            .iter()
            .filter_map(|e| e.text_content())
            .collect();
        assert_eq!(amounts, vec!["$5,200.00", "$3,120.45", "$2,079.55"]);

        let bars: Vec<String> = query_all(&root, ".progress .bar")
            .iter()
            .map(|e| e.class_name())
            .collect();
        assert_eq!(bars, vec!["bar danger", "bar"]);

        let amount_cells = query_all(&root, "td.amount");
        assert_eq!(amount_cells[0].text_content().unwrap(), "-$42.10");
    }
}

use std::rc::Rc;

use shared::{format_currency, AppConfig, BudgetUsage};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BudgetListProps {
    pub usages: Vec<BudgetUsage>,
    pub config: Rc<AppConfig>,
}

/// "$12.00 left", or how far over the limit spending went.
fn remaining_text(usage: &BudgetUsage) -> String {
    let remaining = usage.remaining();
    if remaining < 0.0 {
        format!("{} over", format_currency(-remaining))
    } else {
        format!("{} left", format_currency(remaining))
    }
}

#[function_component(BudgetList)]
pub fn budget_list(props: &BudgetListProps) -> Html {
    let config = &props.config;
    html! {
        <section class="card budgets-section">
            <h3 class="card-title">{"Budgets"}</h3>
            if props.usages.is_empty() {
                <p class="text-center text-muted">{"No budgets set for this month"}</p>
            } else {
                <ul class="budget-list">
                    {for props.usages.iter().map(|usage| {
                        // Same thresholds the page-wide progress updater uses
                        let level = usage.level(config.warning_threshold, config.danger_threshold);
                        let amounts = format!(
                            "{} / {}",
                            format_currency(usage.spent),
                            format_currency(usage.limit)
                        );
                        html! {
                            <li class="budget-item">
                                <div class="budget-header">
                                    <span class="budget-name">{&usage.category_name}</span>
                                    <span class="budget-amounts">{amounts}</span>
                                </div>
                                <div class="progress">
                                    <div
                                        class={classes!("bar", level.css_class())}
                                        style={format!("width: {}%;", usage.bar_width())}
                                    ></div>
                                </div>
                                <span class="budget-percent">{format!("{}%", usage.percent)}</span>
                                <span class="budget-remaining">{remaining_text(usage)}</span>
                            </li>
                        }
                    })}
                </ul>
            }
        </section>
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_remaining_text() {
        assert_eq!(remaining_text(&BudgetUsage::new("Food", 40.0, 100.0)), "$60.00 left");
        assert_eq!(remaining_text(&BudgetUsage::new("Fun", 130.0, 100.0)), "$30.00 over");
    }
}

mod charts;
mod components;
mod exports;
mod services;
mod ui;

fn main() {
    ui::bootstrap::bootstrap();
}

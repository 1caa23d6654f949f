use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::charts::{self, ChartRequest};

#[derive(Properties, PartialEq)]
pub struct ChartCanvasProps {
    /// Id given to the canvas; the renderer looks the mount point up by it
    pub mount_id: AttrValue,
    pub request: ChartRequest,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

/// A canvas that draws its chart after every render.
pub struct ChartCanvas {
    canvas_ref: NodeRef,
}

impl Component for ChartCanvas {
    type Message = ();
    type Properties = ChartCanvasProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        // The canvas has to be in the document before it can be resolved by id
        if self.canvas_ref.cast::<HtmlCanvasElement>().is_none() {
            return;
        }
        let props = ctx.props();
        // Failures are logged by the renderer and leave a placeholder behind
        let _ = charts::render(&props.mount_id, &props.request);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="card chart-card">
                if let Some(title) = &props.title {
                    <h3 class="card-title">{title.clone()}</h3>
                }
                <div class="chart-container">
                    <canvas id={props.mount_id.clone()} ref={self.canvas_ref.clone()}></canvas>
                </div>
            </div>
        }
    }
}

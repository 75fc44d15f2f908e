use crate::constants::PANEL_ID;
use crate::dom;
use hero_core::{ControlSpec, Folder, HeroScene, CONTROLS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct ControlRow {
    spec: &'static ControlSpec,
    input: web::HtmlInputElement,
    readout: web::Element,
}

impl ControlRow {
    fn show(&self, value: f32) {
        self.input.set_value(&value.to_string());
        self.readout.set_text_content(Some(&self.spec.format(value)));
    }
}

/// Build the floating settings panel and wire it to the hero scene.
pub fn build_panel(document: &web::Document, hero: Rc<RefCell<HeroScene>>) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let panel = dom::create_element(document, "div")?;
    panel.set_id(PANEL_ID);

    let mut rows = Vec::with_capacity(CONTROLS.len());
    for folder in [Folder::Animation, Folder::LightIntensity] {
        let details = dom::create_element(document, "details")?
            .dyn_into::<web::HtmlDetailsElement>()
            .map_err(|e| anyhow::anyhow!("details: {:?}", e))?;
        details.set_open(folder.expanded_by_default());
        let summary = dom::create_element(document, "summary")?;
        summary.set_text_content(Some(folder.title()));
        append(&details, &summary)?;

        for spec in CONTROLS.iter().filter(|s| s.folder == folder) {
            if spec.separator_before {
                append(&details, &dom::create_element(document, "hr")?)?;
            }
            let row = build_row(document, spec, hero.borrow().settings.get(spec.control))?;
            append(&details, &row.0)?;
            rows.push(row.1);
        }
        append(&panel, &details)?;
    }

    let reset = dom::create_element(document, "button")?;
    reset.set_class_name("reset");
    reset.set_text_content(Some("Reset all"));
    append(&panel, &reset)?;
    append(&body, &panel)?;

    let rows = Rc::new(rows);
    for row in rows.iter() {
        wire_input(row, hero.clone());
    }
    dom::add_click_listener(&reset, move || {
        let mut h = hero.borrow_mut();
        h.reset();
        for row in rows.iter() {
            row.show(h.settings.get(row.spec.control));
        }
    });
    log::info!("[panel] {} controls", CONTROLS.len());
    Ok(())
}

fn build_row(
    document: &web::Document,
    spec: &'static ControlSpec,
    value: f32,
) -> anyhow::Result<(web::Element, ControlRow)> {
    let label = dom::create_element(document, "label")?;
    label.set_class_name("row");
    let name = dom::create_element(document, "span")?;
    name.set_text_content(Some(spec.label));

    let input = dom::create_element(document, "input")?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!("input: {:?}", e))?;
    input.set_type("range");
    input.set_min(&spec.min.to_string());
    input.set_max(&spec.max.to_string());
    input.set_step(&spec.step.to_string());
    _ = input.set_attribute("data-key", spec.key);

    let readout = dom::create_element(document, "output")?;

    append(&label, &name)?;
    append(&label, &input)?;
    append(&label, &readout)?;
    let row = ControlRow {
        spec,
        input,
        readout,
    };
    row.show(value);
    Ok((label, row))
}

fn wire_input(row: &ControlRow, hero: Rc<RefCell<HeroScene>>) {
    let input = row.input.clone();
    let readout = row.readout.clone();
    let spec = row.spec;
    let closure = Closure::wrap(Box::new(move || {
        let result = hero
            .borrow_mut()
            .set_control_from_input(spec.key, &input.value());
        match result {
            Ok(v) => readout.set_text_content(Some(&spec.format(v))),
            Err(e) => log::warn!("[panel] {}", e),
        }
    }) as Box<dyn FnMut()>);
    _ = row
        .input
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))
}

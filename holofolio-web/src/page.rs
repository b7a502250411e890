//! Page lifecycle: wires the models to the DOM
//!
//! [`Page::mount`] looks up the page elements, builds every component and
//! registers listeners, timers and the animation frame loop. Everything it
//! registers is owned by the returned [`Page`] and released again by
//! [`Page::teardown`].
//!
//! Components are independent. When the elements a component needs are
//! missing, the problem is logged once and only that component is skipped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, PageTransitionEvent, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::canvas2d::Surface;
use crate::catalog::SiteContent;
use crate::config::{COUNTER_STEP_MS, DeviceClass, FieldConfig, FrameConfig, SkillConfig};
use crate::counter::{self, Counter};
use crate::dom::{self, Listener};
use crate::error::{PortfolioError, PortfolioResult};
use crate::fetch::fetch_documentation;
use crate::field::{Bounds, NeuralField};
use crate::frame;
use crate::modal::{self, DocOutcome, ModalState};
use crate::nav::NavState;
use crate::skills::SkillField;

/// Log a component setup failure once and carry on without it
fn report<T>(component: &str, result: PortfolioResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(component, %err, "component disabled");
            None
        }
    }
}

/// Everything registered by [`Page::mount`]
pub struct Page {
    listeners: Vec<Listener>,
    frame_loop: Option<FrameLoop>,
    counters: Option<CounterBoard>,
}

impl Page {
    pub fn mount() -> PortfolioResult<Self> {
        let window = dom::window()?;
        let document = dom::document()?;
        let content = Rc::new(SiteContent::embedded()?);

        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let device = DeviceClass::from_user_agent(&user_agent);
        let seed = (js_sys::Math::random() * 2f64.powi(53)) as u64;
        tracing::info!(?device, "mounting page");

        let mut page = Self {
            listeners: Vec::new(),
            frame_loop: None,
            counters: None,
        };

        if let Some(listeners) = report("navigation", mount_navigation(&document, &window)) {
            page.listeners.extend(listeners);
        }

        let scenes = Rc::new(RefCell::new(Scenes::mount(
            &document, &window, device, &content, seed,
        )));
        {
            let scenes = scenes.clone();
            let resize_window = window.clone();
            let resized = Listener::attach(&window, "resize", move |_| {
                let (width, height) = dom::viewport(&resize_window);
                scenes.borrow_mut().resize(width, height);
            });
            if let Some(listener) = report("resize", resized) {
                page.listeners.push(listener);
            }
        }
        page.frame_loop = report("animation", FrameLoop::start(&window, scenes));

        page.counters = report("counters", CounterBoard::mount(&document, &window));

        if let Some(listeners) = report("project modal", mount_modal(&document, content)) {
            page.listeners.extend(listeners);
        }

        let hidden = Listener::attach(&window, "pagehide", |event: Event| {
            match PageHide::from_event(&event) {
                // Restored from the back/forward cache without a new start
                PageHide::Cached => tracing::debug!("page cached, keeping it mounted"),
                // Tear down after the handler returns; a listener must not
                // drop its own closure while running.
                PageHide::Unloading => spawn_local(async { crate::unmount() }),
            }
        });
        if let Some(listener) = report("lifecycle", hidden) {
            page.listeners.push(listener);
        }

        Ok(page)
    }

    /// Remove listeners, stop the frame loop and the counter timer
    pub fn teardown(self) {
        for listener in self.listeners {
            listener.detach();
        }
        if let Some(frame_loop) = self.frame_loop {
            frame_loop.stop();
        }
        if let Some(counters) = self.counters {
            counters.stop();
        }
        tracing::info!("page torn down");
    }
}

/// Why the page is being hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageHide {
    /// Kept in the back/forward cache and may be shown again as is
    Cached,
    Unloading,
}

impl PageHide {
    fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Cached
        } else {
            PageHide::Unloading
        }
    }

    fn from_event(event: &Event) -> Self {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        Self::from_persisted(persisted)
    }
}

// --- Navigation ---

struct Navigation {
    window: Window,
    document: Document,
    hamburger: Element,
    sidebar: Element,
    overlay: Element,
    links: Vec<Element>,
    state: RefCell<NavState>,
}

impl Navigation {
    /// Reflect the state onto the DOM; all three toggles share one flag
    fn render(&self) {
        let state = self.state.borrow();
        for element in [&self.hamburger, &self.sidebar, &self.overlay] {
            dom::set_active(element, state.is_open());
        }
        for (index, link) in self.links.iter().enumerate() {
            dom::set_active(link, state.is_active(index));
        }
    }

    fn select(&self, index: usize) {
        let href = self.links[index].get_attribute("href");
        let (width, _) = dom::viewport(&self.window);
        let action = self
            .state
            .borrow_mut()
            .select(index, href.as_deref(), width);

        if let Some(selector) = action.scroll_to.as_deref() {
            match self.document.query_selector(selector) {
                Ok(Some(section)) => {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    section.scroll_into_view_with_scroll_into_view_options(&options);
                }
                Ok(None) => tracing::warn!(selector, "no section matches link"),
                Err(_) => tracing::warn!(selector, "link href is not a valid selector"),
            }
        }
        self.render();
    }
}

fn mount_navigation(document: &Document, window: &Window) -> PortfolioResult<Vec<Listener>> {
    let nav = Rc::new(Navigation {
        window: window.clone(),
        document: document.clone(),
        hamburger: dom::by_id(document, "hamburger")?,
        sidebar: dom::by_id(document, "sidebar")?,
        overlay: dom::by_id(document, "overlay")?,
        links: dom::query_all(document, ".sidebar a")?,
        state: RefCell::new(NavState::new()),
    });

    let mut listeners = Vec::with_capacity(nav.links.len() + 2);

    let toggle = nav.clone();
    listeners.push(Listener::attach(&nav.hamburger, "click", move |_| {
        toggle.state.borrow_mut().toggle();
        toggle.render();
    })?);

    let outside = nav.clone();
    listeners.push(Listener::attach(&nav.overlay, "click", move |_| {
        outside.state.borrow_mut().close();
        outside.render();
    })?);

    for (index, link) in nav.links.iter().enumerate() {
        let select = nav.clone();
        listeners.push(Listener::attach(link, "click", move |event: Event| {
            event.prevent_default();
            select.select(index);
        })?);
    }

    tracing::debug!(links = nav.links.len(), "navigation ready");
    Ok(listeners)
}

// --- Canvas scenes ---

struct NeuralScene {
    surface: Surface,
    field: NeuralField,
}

struct HoloScene {
    surface: Surface,
    config: FrameConfig,
}

struct SkillScene {
    surface: Surface,
    field: SkillField,
}

impl NeuralScene {
    fn mount(document: &Document, window: &Window, device: DeviceClass, seed: u64) -> PortfolioResult<Self> {
        let surface = Surface::new(dom::by_id(document, "neuralCanvas")?)?;
        let (width, height) = dom::viewport(window);
        surface.resize(width as u32, height as u32);
        let field = NeuralField::new(
            FieldConfig::for_device(device),
            Bounds::new(width as f32, height as f32),
            seed,
        );
        Ok(Self { surface, field })
    }
}

impl HoloScene {
    fn mount(document: &Document) -> PortfolioResult<Self> {
        let surface = Surface::new(dom::by_id(document, "holoCanvas")?)?;
        let config = FrameConfig::default();
        surface.resize(config.width, config.height);
        Ok(Self { surface, config })
    }
}

impl SkillScene {
    /// Labels move within the canvas' own width/height attributes
    fn mount(document: &Document, skills: &[String], seed: u64) -> PortfolioResult<Self> {
        let surface = Surface::new(dom::by_id(document, "skillsCanvas")?)?;
        let bounds = Bounds::new(surface.width() as f32, surface.height() as f32);
        let field = SkillField::new(skills, bounds, SkillConfig::default(), seed);
        Ok(Self { surface, field })
    }
}

/// All canvas scenes driven by the frame loop
struct Scenes {
    neural: Option<NeuralScene>,
    holo: Option<HoloScene>,
    skills: Option<SkillScene>,
}

impl Scenes {
    fn mount(
        document: &Document,
        window: &Window,
        device: DeviceClass,
        content: &SiteContent,
        seed: u64,
    ) -> Self {
        let neural = report(
            "neural background",
            NeuralScene::mount(document, window, device, seed),
        );
        let holo = report("portrait frame", HoloScene::mount(document));
        let skills = report(
            "skills matrix",
            SkillScene::mount(document, &content.skills, seed ^ 0x5eed),
        );

        Self {
            neural,
            holo,
            skills,
        }
    }

    fn frame(&mut self, now_ms: f64) {
        if let Some(neural) = &mut self.neural {
            if neural.field.tick(now_ms) {
                neural.surface.draw_field(&neural.field);
            }
        }
        if let Some(holo) = &self.holo {
            holo.surface
                .draw_frame(&frame::layers(now_ms / 1000.0, &holo.config));
        }
        if let Some(skills) = &mut self.skills {
            skills.field.step();
            skills.surface.draw_skills(&skills.field);
        }
    }

    fn resize(&mut self, width: f64, height: f64) {
        if let Some(neural) = &mut self.neural {
            neural.surface.resize(width as u32, height as u32);
            neural.field.resize(width as f32, height as f32);
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(window: &Window, callback: &FrameCallback) -> PortfolioResult<i32> {
    let callback = callback.borrow();
    let callback = callback
        .as_ref()
        .ok_or_else(|| PortfolioError::Js("frame loop stopped".to_string()))?;
    Ok(window.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

/// Self-rescheduling `requestAnimationFrame` loop
struct FrameLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    fn start(window: &Window, scenes: Rc<RefCell<Scenes>>) -> PortfolioResult<Self> {
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let next_window = window.clone();
        let next_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            scenes.borrow_mut().frame(now_ms);
            match request_frame(&next_window, &next) {
                Ok(id) => next_handle.set(Some(id)),
                Err(err) => tracing::debug!(%err, "frame loop ended"),
            }
        }));

        handle.set(Some(request_frame(window, &callback)?));
        Ok(Self {
            window: window.clone(),
            handle,
            callback,
        })
    }

    fn stop(self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself
        self.callback.borrow_mut().take();
    }
}

// --- Counters ---

struct CounterSlot {
    element: Element,
    counter: Counter,
}

/// Shared stepping interval, armed only while some counter is running
struct StepTimer {
    window: Window,
    handle: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl StepTimer {
    fn arm(&self) {
        if self.handle.get().is_some() {
            return;
        }
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), COUNTER_STEP_MS)
        {
            Ok(id) => self.handle.set(Some(id)),
            Err(err) => tracing::error!(?err, "counter timer failed to start"),
        }
    }

    fn disarm(&self) {
        if let Some(id) = self.handle.take() {
            self.window.clear_interval_with_handle(id);
        }
    }
}

/// Visibility observers plus the stepping timer they arm
struct CounterBoard {
    observers: Vec<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>,
    timer: Option<Rc<StepTimer>>,
}

impl CounterBoard {
    fn mount(document: &Document, window: &Window) -> PortfolioResult<Self> {
        let slots: Vec<CounterSlot> = dom::query_all(document, ".counter")?
            .into_iter()
            .filter_map(|element| {
                let target = element.get_attribute("data-target");
                match target.as_deref().and_then(Counter::from_attribute) {
                    Some(counter) => Some(CounterSlot { element, counter }),
                    None => {
                        tracing::warn!(?target, "counter without a valid data-target skipped");
                        None
                    }
                }
            })
            .collect();

        let mut board = Self {
            observers: Vec::new(),
            timer: None,
        };
        if slots.is_empty() {
            tracing::debug!("no counters on the page");
            return Ok(board);
        }

        let observed: Vec<Element> = slots
            .iter()
            .map(|slot| {
                slot.element
                    .parent_element()
                    .unwrap_or_else(|| slot.element.clone())
            })
            .collect();
        let slots = Rc::new(RefCell::new(slots));

        let timer = Rc::new(StepTimer {
            window: window.clone(),
            handle: Cell::new(None),
            tick: RefCell::new(None),
        });
        {
            let slots = slots.clone();
            let timer_ref = Rc::downgrade(&timer);
            *timer.tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
                let mut slots = slots.borrow_mut();
                for slot in slots.iter_mut() {
                    if let Some(text) = slot.counter.step() {
                        slot.element.set_text_content(Some(&text));
                    }
                }
                if !counter::any_running(slots.iter().map(|slot| &slot.counter)) {
                    if let Some(timer) = timer_ref.upgrade() {
                        timer.disarm();
                    }
                }
            }));
        }

        for (index, element) in observed.iter().enumerate() {
            let slots = slots.clone();
            let timer = timer.clone();
            let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
                let visible = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());
                if !visible {
                    return;
                }
                let started = slots
                    .borrow_mut()
                    .get_mut(index)
                    .is_some_and(|slot| slot.counter.trigger());
                if started {
                    timer.arm();
                }
            });

            let options = IntersectionObserverInit::new();
            options.set_threshold(&JsValue::from_f64(0.5));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
            observer.observe(element);
            board.observers.push((observer, callback));
        }

        board.timer = Some(timer);
        Ok(board)
    }

    fn stop(self) {
        if let Some(timer) = self.timer {
            timer.disarm();
            timer.tick.borrow_mut().take();
        }
        for (observer, _callback) in self.observers {
            observer.disconnect();
        }
    }
}

// --- Project modal ---

struct ProjectModal {
    container: Element,
    body: Element,
    content: Rc<SiteContent>,
    state: RefCell<ModalState>,
}

impl ProjectModal {
    fn show(&self, id: &str, outcome: &DocOutcome) {
        match modal::render_for(&self.content, id, outcome) {
            Ok(html) => self.body.set_inner_html(&html),
            Err(err) => tracing::error!(project = id, %err, "modal render failed"),
        }
    }

    fn sync_visibility(&self) {
        dom::set_active(&self.container, self.state.borrow().is_visible());
    }

    fn close(&self) {
        self.state.borrow_mut().close();
        self.sync_visibility();
    }
}

/// Open a project: render immediately with a loading placeholder, then
/// re-render once the documentation settles (unless superseded).
async fn open_project(modal: Rc<ProjectModal>, id: String) {
    let ticket = modal.state.borrow_mut().open(&id);
    modal.show(&id, &DocOutcome::Loading);
    modal.sync_visibility();

    let Ok(project) = modal.content.project(&id) else {
        return;
    };
    let doc_path = project.doc.clone();
    let outcome = fetch_documentation(&doc_path).await;

    if modal.state.borrow().is_current(ticket) {
        modal.show(&id, &outcome);
    } else {
        tracing::debug!(project = %id, "discarding documentation for a superseded open");
    }
}

fn mount_modal(document: &Document, content: Rc<SiteContent>) -> PortfolioResult<Vec<Listener>> {
    let modal = Rc::new(ProjectModal {
        container: dom::by_id(document, "projectModal")?,
        body: dom::by_id(document, "modalBody")?,
        content,
        state: RefCell::new(ModalState::new()),
    });
    let close_control = dom::query(document, ".modal-close")?;
    let cards = dom::query_all(document, ".project-holo-card")?;

    let mut listeners = Vec::with_capacity(cards.len() + 2);

    for card in &cards {
        let modal = modal.clone();
        let id = card.get_attribute("data-project");
        listeners.push(Listener::attach(card, "click", move |_| match &id {
            Some(id) => spawn_local(open_project(modal.clone(), id.clone())),
            None => tracing::warn!("project card without data-project"),
        })?);
    }

    let closer = modal.clone();
    listeners.push(Listener::attach(&close_control, "click", move |_| {
        closer.close();
    })?);

    let backdrop = modal.clone();
    listeners.push(Listener::attach(&modal.container, "click", move |event: Event| {
        let container: &JsValue = backdrop.container.as_ref();
        let on_backdrop = event.target().is_some_and(|target| {
            let target: &JsValue = target.as_ref();
            target == container
        });
        if backdrop.state.borrow_mut().click(on_backdrop) {
            backdrop.sync_visibility();
        }
    })?);

    tracing::debug!(cards = cards.len(), "project modal ready");
    Ok(listeners)
}

use gtk4 as gtk;

use std::cell::RefCell;
use std::rc::Rc;

use gtk::prelude::*;

use crate::api::{ScrollHost, TimelineEngine};

/// Scroll host backed by a `gtk::ScrolledWindow`'s horizontal adjustment.
pub struct GtkScrollHost {
    hadjustment: gtk::Adjustment,
    content: gtk::Widget,
}

impl GtkScrollHost {
    #[must_use]
    pub fn new(scroller: &gtk::ScrolledWindow, content: &impl IsA<gtk::Widget>) -> Self {
        Self {
            hadjustment: scroller.hadjustment(),
            content: content.clone().upcast(),
        }
    }
}

impl ScrollHost for GtkScrollHost {
    fn scroll_offset(&self) -> f64 {
        self.hadjustment.value()
    }

    fn request_redraw(&mut self) {
        self.content.queue_draw();
    }
}

/// Mounts an engine on a scrolled window and forwards scroll changes.
///
/// The value-changed signal is connected once at mount time, so repeated
/// `set_events` calls never stack listeners. The adapter holds the engine
/// behind `Rc<RefCell<_>>` for sharing with GTK signal closures on the main
/// thread.
pub struct GtkTimelineAdapter {
    engine: Rc<RefCell<TimelineEngine<GtkScrollHost>>>,
}

impl GtkTimelineAdapter {
    pub fn mount(
        mut engine: TimelineEngine<GtkScrollHost>,
        scroller: &gtk::ScrolledWindow,
        content: &impl IsA<gtk::Widget>,
    ) -> Self {
        engine.attach_host(GtkScrollHost::new(scroller, content));

        let engine = Rc::new(RefCell::new(engine));
        let weak = Rc::downgrade(&engine);
        scroller.hadjustment().connect_value_changed(move |_| {
            if let Some(engine) = weak.upgrade() {
                engine.borrow_mut().notify_scroll_changed();
            }
        });

        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> Rc<RefCell<TimelineEngine<GtkScrollHost>>> {
        Rc::clone(&self.engine)
    }
}

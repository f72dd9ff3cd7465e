// Copyright 2026 the Inlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing adapter around one embedded native view.
//!
//! [`PlatformViewAdapter`] owns everything that persists between frames:
//! the current [`ViewPlacement`], the last resolved composite, the paint
//! state, the gesture state and the focus subscription. Hosts call it from
//! their view callbacks:
//!
//! | Host callback             | Adapter entry point                          |
//! |---------------------------|----------------------------------------------|
//! | compositor frame arrives  | [`update_placement`](PlatformViewAdapter::update_placement) |
//! | view draws                | [`paint`](PlatformViewAdapter::paint)        |
//! | touch delivered           | [`handle_touch`](PlatformViewAdapter::handle_touch) |
//! | touch interception query  | [`intercepts_touch`](PlatformViewAdapter::intercepts_touch) |
//! | accessibility event       | [`should_forward_accessibility_event`](PlatformViewAdapter::should_forward_accessibility_event) |

use tracing::debug;

use crate::apply::RenderApplier;
use crate::canvas::Canvas;
use crate::error::AdapterResult;
use crate::focus::{FocusListener, FocusObserver, FocusSubscription};
use crate::mutator::MutatorStack;
use crate::placement::{ViewFrame, ViewPlacement};
use crate::resolve::{ResolvedComposite, resolve};
use crate::stretch::{StretchConfig, StretchEffect};
use crate::touch::{GestureState, TouchEvent, TouchProcessor, TouchRemapper};
use crate::trace::{PlacementEvent, TouchRemapEvent, Tracer};
use crate::view::{AccessibilityImportance, NativeView};

/// Construction-time settings for a [`PlatformViewAdapter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdapterConfig {
    /// Logical-to-physical pixel ratio of the host display.
    pub density_scale: f64,
    /// Overscroll stretch tuning.
    pub stretch: StretchConfig,
    /// Whether the host can run render effects. When `false`, overscroll is
    /// ignored.
    pub render_effects: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            density_scale: 1.0,
            stretch: StretchConfig::default(),
            render_effects: true,
        }
    }
}

impl AdapterConfig {
    /// Default settings at the given density.
    #[must_use]
    pub fn new(density_scale: f64) -> Self {
        Self {
            density_scale,
            ..Self::default()
        }
    }
}

/// Makes a native view render and hit-test like a compositor layer.
pub struct PlatformViewAdapter<V> {
    view: V,
    config: AdapterConfig,
    placement: ViewPlacement,
    frame: Option<ViewFrame>,
    composite: Option<ResolvedComposite>,
    stretch: Option<StretchEffect>,
    applier: RenderApplier,
    touch: TouchRemapper,
    touch_processor: Option<Box<dyn TouchProcessor>>,
    focus: FocusSubscription,
    placement_count: u64,
}

impl<V: core::fmt::Debug> core::fmt::Debug for PlatformViewAdapter<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlatformViewAdapter")
            .field("view", &self.view)
            .field("config", &self.config)
            .field("placement", &self.placement)
            .field("frame", &self.frame)
            .field("stretch", &self.stretch)
            .field("applier", &self.applier)
            .field("touch", &self.touch)
            .field("has_touch_processor", &self.touch_processor.is_some())
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl<V: NativeView> PlatformViewAdapter<V> {
    /// Wraps `view`.
    ///
    /// Fails if the configured density is not finite and positive.
    pub fn new(view: V, config: AdapterConfig) -> AdapterResult<Self> {
        let placement = ViewPlacement::new(config.density_scale)?;
        Ok(Self {
            view,
            config,
            placement,
            frame: None,
            composite: None,
            stretch: None,
            applier: RenderApplier::new(),
            touch: TouchRemapper::new(),
            touch_processor: None,
            focus: FocusSubscription::new(),
            placement_count: 0,
        })
    }

    /// Installs the compositor's touch sink.
    #[must_use]
    pub fn with_touch_processor(mut self, processor: impl TouchProcessor + 'static) -> Self {
        self.touch_processor = Some(Box::new(processor));
        self
    }

    /// Installs or removes the compositor's touch sink.
    pub fn set_touch_processor(&mut self, processor: Option<Box<dyn TouchProcessor>>) {
        self.touch_processor = processor;
    }

    /// The wrapped view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The wrapped view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Settings the adapter was created with.
    #[must_use]
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Current placement.
    #[must_use]
    pub fn placement(&self) -> &ViewPlacement {
        &self.placement
    }

    /// Frame applied by the last placement update.
    #[must_use]
    pub fn frame(&self) -> Option<ViewFrame> {
        self.frame
    }

    /// Composite resolved by the last placement update.
    #[must_use]
    pub fn composite(&self) -> Option<&ResolvedComposite> {
        self.composite.as_ref()
    }

    /// Stretch effect configured by the last placement update.
    #[must_use]
    pub fn stretch_effect(&self) -> Option<&StretchEffect> {
        self.stretch.as_ref()
    }

    /// Paint-pass state.
    #[must_use]
    pub fn render_state(&self) -> &RenderApplier {
        &self.applier
    }

    /// Current gesture state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.touch.state()
    }

    /// Applies a new frame's mutator stack and view frame.
    pub fn update_placement(
        &mut self,
        stack: MutatorStack,
        left: i32,
        top: i32,
        width: u32,
        height: u32,
    ) {
        self.update_placement_traced(stack, left, top, width, height, &mut Tracer::none());
    }

    /// Like [`update_placement`](Self::update_placement), reporting to
    /// `tracer`.
    pub fn update_placement_traced(
        &mut self,
        stack: MutatorStack,
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        tracer: &mut Tracer<'_>,
    ) {
        self.placement.move_to(left, top, self.touch.is_tracking());

        let frame = ViewFrame {
            left,
            top,
            width,
            height,
        };
        self.view.set_frame(frame);
        self.view.set_will_not_draw(false);
        self.frame = Some(frame);

        let resolved = resolve(&stack);

        if self.config.render_effects {
            self.stretch =
                StretchEffect::for_overscroll(frame.size(), resolved.overscroll, &self.config.stretch);
            self.view.set_render_effect(self.stretch.as_ref());
            if let Some(effect) = &self.stretch {
                debug!(
                    overscroll = ?effect.overscroll,
                    vertical = effect.is_vertical(),
                    "stretch effect configured"
                );
            }
        }

        self.placement_count += 1;
        debug!(
            left,
            top,
            width,
            height,
            ops = stack.len(),
            substituted = resolved.substituted_ops,
            "placement updated"
        );
        tracer.placement(&PlacementEvent {
            placement_index: self.placement_count,
            frame,
            overscroll: resolved.overscroll,
            stretch_configured: self.stretch.is_some(),
            substituted_ops: resolved.substituted_ops,
        });
        self.composite = Some(resolved);
    }

    /// Paints the view: clips on `canvas`, then `children` under the
    /// corrected transform.
    pub fn paint<F>(&mut self, canvas: &mut dyn Canvas, children: F) -> AdapterResult<()>
    where
        F: FnOnce(&mut dyn Canvas) -> anyhow::Result<()>,
    {
        self.paint_traced(canvas, children, &mut Tracer::none())
    }

    /// Like [`paint`](Self::paint), reporting phases to `tracer`.
    pub fn paint_traced<F>(
        &mut self,
        canvas: &mut dyn Canvas,
        children: F,
        tracer: &mut Tracer<'_>,
    ) -> AdapterResult<()>
    where
        F: FnOnce(&mut dyn Canvas) -> anyhow::Result<()>,
    {
        self.applier.paint(
            &mut self.view,
            canvas,
            self.composite.as_ref(),
            &self.placement,
            children,
            tracer,
        )
    }

    /// Remaps `event` into compositor coordinates and forwards it to the
    /// touch processor. Returns `true` if the touch was consumed, which is
    /// every forwarded touch.
    ///
    /// Without a touch processor, or for an event without pointers, the touch
    /// is left to the host.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        self.handle_touch_traced(event, &mut Tracer::none())
    }

    /// Like [`handle_touch`](Self::handle_touch), reporting to `tracer`.
    pub fn handle_touch_traced(&mut self, event: &TouchEvent, tracer: &mut Tracer<'_>) -> bool {
        let Some(processor) = self.touch_processor.as_mut() else {
            return false;
        };
        let Some(remapped) = self.touch.remap(event, &mut self.placement) else {
            return false;
        };
        tracer.touch_remap(&TouchRemapEvent {
            action: remapped.event.action,
            anchor: remapped.anchor,
            gesture: self.touch.state(),
        });
        processor.on_touch_event(&remapped);
        true
    }

    /// Whether touches aimed at descendants of the view are taken by the
    /// adapter. Always `true`: the compositor decides who gets a touch.
    #[must_use]
    pub fn intercepts_touch(&self) -> bool {
        true
    }

    /// Whether an accessibility event from the embedded view should go up to
    /// the host. Events from content hidden from accessibility are dropped;
    /// otherwise `parent` decides.
    pub fn should_forward_accessibility_event(&self, parent: impl FnOnce() -> bool) -> bool {
        if self.view.embedded_importance() == Some(AccessibilityImportance::NoHideDescendants) {
            return false;
        }
        parent()
    }

    /// Installs `listener` on `observer`, replacing any previous one.
    ///
    /// Returns `false` if the observer is no longer alive.
    pub fn set_focus_listener(
        &mut self,
        observer: &mut dyn FocusObserver,
        listener: FocusListener,
    ) -> bool {
        self.focus.replace(observer, listener)
    }

    /// Removes the focus listener, if any.
    pub fn clear_focus_listener(&mut self, observer: &mut dyn FocusObserver) {
        self.focus.clear(observer);
    }

    /// Returns `true` if a focus listener is installed.
    #[must_use]
    pub fn has_focus_listener(&self) -> bool {
        self.focus.is_active()
    }

    /// Tears the adapter down and hands the view back.
    pub fn dispose(mut self, observer: &mut dyn FocusObserver) -> V {
        self.focus.clear(observer);
        self.view
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use quill_engine::coords::Point;
use quill_engine::image::PixelFormat;
use quill_engine::logging::{init_logging, LoggingConfig};
use quill_engine::{
    EffectLevel, FontStyle, Image, ImageId, Key, PenStyle, Rgba, Session, TextAlign, WindowConfig, WindowStyle,
};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const TICK_MS: u32 = 16;
const TRAIL: usize = 48;

/// Faces tried in order for the "sans-serif" family.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Everything the callbacks share.
struct Demo {
    ball: Point,
    velocity: Point,
    angle: f32,
    trail: Vec<Point>,
    typed: String,
    sprite: Image,
    photo: ImageId,
}

impl Demo {
    fn step(&mut self) {
        self.ball = self.ball + self.velocity;
        if self.ball.x < 20.0 || self.ball.x > WIDTH as f32 - 20.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.ball.y < 80.0 || self.ball.y > HEIGHT as f32 - 20.0 {
            self.velocity.y = -self.velocity.y;
        }
        self.angle = (self.angle + 2.0) % 360.0;
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default().filter("info,quill_engine=debug"));

    let mut session = Session::init(
        WindowConfig::new("quill demo", WIDTH, HEIGHT)
            .style(WindowStyle::Sizeable)
            .position(120, 80),
    )
    .context("failed to start the drawing session")?;

    load_font(&mut session);
    let photo = match std::env::args().nth(1) {
        Some(path) => session.canvas_mut().load_image(path.as_str()),
        None => ImageId::null(),
    };
    let demo = Rc::new(RefCell::new(Demo {
        ball: Point::new(200.0, 200.0),
        velocity: Point::new(3.0, 2.0),
        angle: 0.0,
        trail: Vec::new(),
        typed: String::new(),
        sprite: checkerboard().context("failed to build sprite")?,
        photo,
    }));

    register(&mut session, &demo);
    session.start_timer(TICK_MS);

    let code = session.run();
    log::info!("demo finished with {code}");
    session.quit();
    Ok(())
}

fn register(session: &mut Session, demo: &Rc<RefCell<Demo>>) {
    let events = session.events();

    let d = demo.clone();
    events.on_timer(move |ctx| {
        d.borrow_mut().step();
        ctx.request_redraw();
    });

    let d = demo.clone();
    events.on_mouse_move(move |ctx, m| {
        if m.button.is_none() {
            return;
        }
        let mut demo = d.borrow_mut();
        demo.trail.push(Point::new(m.x, m.y));
        if demo.trail.len() > TRAIL {
            demo.trail.remove(0);
        }
        ctx.request_redraw();
    });

    let d = demo.clone();
    events.on_mouse_down(move |_, m| {
        log::info!("mouse {:?} at {:.0},{:.0}", m.button, m.x, m.y);
        d.borrow_mut().trail.clear();
    });

    events.on_key_down(|ctx, key| match key {
        Key::Escape => ctx.exit(),
        Key::Digit1 => set_level(ctx, EffectLevel::Speed),
        Key::Digit2 => set_level(ctx, EffectLevel::Medium),
        Key::Digit3 => set_level(ctx, EffectLevel::Quality),
        _ => {}
    });

    let d = demo.clone();
    events.on_key_press(move |ctx, ch| {
        let mut demo = d.borrow_mut();
        match ch {
            '\u{8}' => {
                demo.typed.pop();
            }
            c if !c.is_control() => demo.typed.push(c),
            _ => {}
        }
        ctx.set_title(format!("quill demo: {}", demo.typed));
    });

    let d = demo.clone();
    events.on_paint(move |ctx| {
        let demo = d.borrow();
        let canvas = &mut *ctx.canvas;

        canvas.clear(Rgba::rgb(24, 26, 32));

        // Header.
        canvas.fill_color(Rgba::rgb(44, 48, 60));
        canvas.fill_roundrect(10.0, 10.0, WIDTH as f32 - 20.0, 56.0, 16.0, 16.0);
        canvas.set_font("sans-serif", 20.0, FontStyle::BOLD);
        canvas.font_color(Rgba::WHITE);
        canvas.draw_text(10.0, 10.0, WIDTH as f32 - 20.0, 56.0, "quill", TextAlign::CENTER);

        // Shapes.
        canvas.pen_color(Rgba::rgb(120, 200, 255));
        canvas.pen_width(2.0);
        canvas.pen_style(PenStyle::Dash);
        canvas.draw_rect(40.0, 100.0, 160.0, 100.0);
        canvas.pen_style(PenStyle::Solid);
        canvas.draw_ellipse(120.0, 150.0, 70.0, 40.0);
        canvas.fill_color(Rgba::rgb(250, 180, 60));
        canvas.fill_polygon(&[
            Point::new(260.0, 200.0),
            Point::new(320.0, 100.0),
            Point::new(380.0, 200.0),
        ]);

        // Mouse trail.
        if demo.trail.len() > 1 {
            canvas.pen_color(Rgba::rgb(140, 255, 140));
            canvas.draw_polyline(&demo.trail);
        }

        // Images.
        canvas.rotate_image(&demo.sprite, 560.0, 120.0, demo.angle);
        if !demo.photo.is_null() {
            canvas.draw_image_scaled(demo.photo, 440.0, 300.0, 320.0, 240.0);
        }

        // Ball.
        canvas.fill_color(Rgba::rgb(230, 70, 90));
        canvas.fill_circle(demo.ball.x, demo.ball.y, 16.0);

        // Status line.
        canvas.set_font("sans-serif", 14.0, FontStyle::NORMAL);
        canvas.font_color(Rgba::rgb(200, 200, 210));
        let frame = ctx.time.map(|t| t.frame_index).unwrap_or_default();
        let level = canvas.level();
        canvas.print(
            16.0,
            HEIGHT as f32 - 28.0,
            format_args!("frame {frame}  level {level:?}  typed \"{}\"", demo.typed),
        );
    });
}

fn load_font(session: &mut Session) {
    let canvas = session.canvas_mut();
    for path in FONT_CANDIDATES {
        match canvas.load_font_file("sans-serif", path) {
            Ok(_) => {
                log::info!("using font {path}");
                return;
            }
            Err(e) => log::debug!("skipping font: {e}"),
        }
    }
    log::warn!("no font found; text will not be drawn");
}

fn set_level(ctx: &mut quill_engine::EventCtx<'_>, level: EffectLevel) {
    let previous = ctx.canvas.effect_level(level);
    log::info!("effect level {previous:?} -> {level:?}");
    ctx.request_redraw();
}

/// 64x64 two-tone checkerboard with a red corner marker, so rotation is visible.
fn checkerboard() -> Result<Image> {
    let mut img = Image::create(64, 64, PixelFormat::Rgba8)?;
    for y in 0..64 {
        for x in 0..64 {
            let color = if x < 12 && y < 12 {
                Rgba::rgb(255, 40, 40)
            } else if (x / 8 + y / 8) % 2 == 0 {
                Rgba::rgb(230, 230, 230)
            } else {
                Rgba::rgb(70, 90, 160)
            };
            img.set_pixel(x, y, color);
        }
    }
    Ok(img)
}

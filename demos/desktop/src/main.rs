use glfw::{Action, Context as _, Key, WindowEvent};
use std::process;
use std::time::Instant;
use structopt::StructOpt;
use trigon::GraphicsContext;
use trigon_demos::{Demo, InputAction, LoopFeedback};
use trigon_glfw::GlfwSurface;
use trigon_windowing::{WindowDim, WindowOpt};

#[derive(Debug, StructOpt)]
pub struct CliOpts {
  #[structopt(short, long)]
  /// Open the demo fullscreen on the primary monitor.
  fullscreen: bool,

  #[structopt(short, long)]
  /// List available demos.
  list_demos: bool,

  /// Demo to run.
  demo: Option<String>,
}

/// Keys sampled as discrete states every frame, with the action one held frame emits.
const HELD_KEY_BINDINGS: [(Key, InputAction); 6] = [
  (Key::Left, InputAction::Left),
  (Key::Right, InputAction::Right),
  (Key::Up, InputAction::Up),
  (Key::Down, InputAction::Down),
  (Key::W, InputAction::Forward),
  (Key::S, InputAction::Backward),
];

/// Macro to declaratively add demos.
macro_rules! demos {
  ($($name:literal, $module:ident),* $(,)?) => {
    fn show_available_demos() {
      println!("available demos:");
      $( println!("  - {}", $name); )*
    }

    // run a demo based on its name
    fn pick_and_run_demo(cli_opts: CliOpts) {
      let demo_name = cli_opts.demo.as_ref().map(|n| n.as_str());
      match demo_name {
        $(
          Some($name) => run_demo::<trigon_demos::$module::LocalDemo>(&cli_opts, $name)
        ),*,

        _ => {
          log::error!("no demo found");
          show_available_demos();
        }
      }
    }
  }
}

demos! {
  "hello-triangle", hello_triangle,
  "moving-triangle", moving_triangle,
  "color-wave", color_wave,
  "perspective-triangle", perspective_triangle,
}

// Run a demo until its window closes.
fn run_demo<D>(cli_opts: &CliOpts, name: &str)
where
  D: Demo,
{
  let dim = if cli_opts.fullscreen {
    WindowDim::Fullscreen
  } else {
    WindowDim::Windowed {
      width: 800,
      height: 800,
    }
  };

  // first thing first: a surface to render to and get events from; failing here is fatal
  let surface = match GlfwSurface::new_gl33(name, WindowOpt::default().set_dim(dim)) {
    Ok(surface) => surface,

    Err(e) => {
      log::error!("cannot create GLFW surface: {}", e);
      process::exit(1);
    }
  };

  let mut context = surface.context;
  let events = surface.events_rx;

  let mut demo = D::bootstrap(&mut context);
  let start_t = Instant::now();

  // deliver the initial framebuffer size with the first frame; demos that track the aspect
  // ratio bootstrap from it
  let (fb_w, fb_h) = context.window.get_framebuffer_size();
  context.backend().set_viewport(fb_w as u32, fb_h as u32);
  let mut startup = Some(InputAction::Resized {
    width: fb_w as u32,
    height: fb_h as u32,
  });

  while !context.window.should_close() {
    context.window.glfw.poll_events();

    let mut actions: Vec<InputAction> = startup.take().into_iter().collect();

    for (_, event) in glfw::flush_messages(&events) {
      match event {
        WindowEvent::Close => actions.push(InputAction::Quit),

        WindowEvent::FramebufferSize(width, height) => {
          context.backend().set_viewport(width as u32, height as u32);
          actions.push(InputAction::Resized {
            width: width as u32,
            height: height as u32,
          });
        }

        WindowEvent::Key(key, _, Action::Press, _) => {
          log::debug!("key press: {:?}", key);
        }

        _ => (),
      }
    }

    // escape requests closing; the observing frame still completes, draw and present
    // included, and the loop condition stops the next iteration
    if context.window.get_key(Key::Escape) == Action::Press {
      context.window.set_should_close(true);
    }

    // discrete key-state polling: one motion action per held key per frame
    for (key, action) in HELD_KEY_BINDINGS {
      if context.window.get_key(key) == Action::Press {
        actions.push(action);
      }
    }

    let t = start_t.elapsed().as_secs_f32();

    match demo.render_frame(t, actions.into_iter(), &mut context) {
      LoopFeedback::Continue(stepped) => {
        demo = stepped;
        context.window.swap_buffers();
      }

      LoopFeedback::Exit => break,
    }
  }
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();

  let cli_opts = CliOpts::from_args();

  if cli_opts.list_demos {
    show_available_demos();
  } else {
    pick_and_run_demo(cli_opts);
  }
}

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use colormap_intervals::{ColorRange, ColorValue, ConfigLoader, Ramp, Session,
                         STRIPE_WIDTH};

type Err = Box<dyn Error>;

fn css_string(c: &ColorValue) -> String {
    match c.to_rgb8() {
        Some(c) => format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
        None => c.to_string(),
    }
}

fn table_of_colors(fh: &mut impl Write, colors: &[ColorValue],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td></tr>\
                  </table>")?;
    Ok(())
}

fn ramp(fh: &mut impl Write, ramp: &Ramp, n: usize, width: u32,
        comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = ramp.range(0., 1., n).map(|(_, c)| c).collect();
    table_of_colors(fh, &colors, width, comment)?;
    let ticks: Vec<_> = ramp.ticks().into_iter().map(|t| t.label).collect();
    writeln!(fh, "<p>Ticks: {}</p>", ticks.join(", "))?;
    Ok(())
}

fn main() -> Result<(), Err> {
    env_logger::Builder::from_env(env_logger::Env::default()
                                  .default_filter_or("info"))
        .init();
    let config = ConfigLoader::load()?;
    let mut session = Session::new(config);
    let mut repo = session.open_repository()?;

    let mut fh = BufWriter::new(File::create("ramp.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Colormap intervals: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Default</h3>")?;
    ramp(&mut fh, &session.ramp(), 100, 4, "")?;

    writeln!(fh, "<h3>Edits</h3>")?;
    session.insert("red", 20., 40.)?;
    ramp(&mut fh, &session.ramp(), 100, 4, "insert red [20, 40)")?;
    session.insert("rgb(67,147,195)", 60., 75.)?;
    ramp(&mut fh, &session.ramp(), 100, 4, "insert rgb(67,147,195) [60, 75)")?;
    session.trim_and_expand(10., 90.)?;
    ramp(&mut fh, &session.ramp(), 100, 4, "bounds [10, 90)")?;
    session.replace_background_color("gray");
    ramp(&mut fh, &session.ramp(), 100, 4, "background gray")?;

    let name = session.save(repo.as_mut())?;
    session.reset();
    ramp(&mut fh, &session.ramp(), 100, 4, "reset")?;
    session.load(repo.as_ref(), &name)?;
    ramp(&mut fh, &session.ramp(), 100, 4, &format!("loaded {name}"))?;

    writeln!(fh, "<h3>Black stripes</h3>")?;
    let stops = session.ramp().with_stripes(10, STRIPE_WIDTH,
                                            &ColorValue::new("black"));
    let colors: Vec<_> = stops.iter().map(|s| s.color.clone()).collect();
    table_of_colors(&mut fh, &colors, 12, "one stop per cell")?;

    writeln!(fh, "<h3>Intervals</h3>\n<ul>")?;
    for line in session.describe() {
        writeln!(fh, "  <li>{line}</li>")?;
    }
    writeln!(fh, "</ul>")?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}

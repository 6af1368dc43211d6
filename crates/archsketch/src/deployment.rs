//! The Adoris Invest Group deployment architecture, as literal scene data.
//!
//! Positions are canvas units on a 10 × 10 canvas drawn at 14 × 10 inches.
//! Label strings carry the actual configuration values (hosts, ports,
//! regions), so they are reproduced exactly.

use archsketch_core::{
    color::{Color, ColorError},
    draw::{ArrowDirection, StrokeDefinition},
    geometry::{Point, Size},
    scene::{Canvas, Connector, Node, Scene, TextBlock},
};

/// Canvas extent in abstract units.
pub const CANVAS_EXTENT: (f32, f32) = (10.0, 10.0);

/// Figure size in inches.
pub const FIGURE_SIZE: (f32, f32) = (14.0, 10.0);

const GITHUB: &str = "#24292e";
const VERCEL: &str = "#000000";
const SUPABASE: &str = "#3ECF8E";
const DOMAIN: &str = "#0066cc";
const GMAIL: &str = "#D44638";
const AWS: &str = "#FF9900";
const ACCENT: &str = "#20a895";
const MUTED: &str = "#666";

const ENV_VARS: [&str; 4] = [
    "DATABASE_URL (Supabase Connection)",
    "NEXTAUTH_SECRET & NEXTAUTH_URL",
    "AWS_* (S3 Configuration)",
    "SMTP_* & EMAIL_* (Gmail SMTP)",
];

const STEPS: [&str; 6] = [
    "1. Import GitHub repo to Vercel",
    "2. Set Root Directory: nextjs_space/",
    "3. Configure Environment Variables",
    "4. Deploy and get vercel.app URL",
    "5. Add Custom Domain: shop.adorisgroup.com",
    "6. Configure DNS CNAME record",
];

/// Steps per column in the deployment steps panel.
const STEPS_PER_COLUMN: usize = 3;
const STEP_COLUMNS_X: [f32; 2] = [1.0, 5.5];
const LIST_TOP_Y: f32 = 1.6;
const LIST_LINE_SPACING: f32 = 0.3;

/// Vercel box anchor that every service connector starts from.
const VERCEL_BOTTOM: Point = Point::new(4.5, 7.0);

/// Builds the deployment diagram scene with all text set in `font_family`.
///
/// # Errors
///
/// Returns a [`ColorError`] if any literal color fails to parse.
pub fn scene(font_family: &str) -> Result<Scene, ColorError> {
    DeploymentScene { font_family }.build()
}

struct DeploymentScene<'a> {
    font_family: &'a str,
}

impl DeploymentScene<'_> {
    fn build(&self) -> Result<Scene, ColorError> {
        let canvas = Canvas::new(
            Size::new(CANVAS_EXTENT.0, CANVAS_EXTENT.1),
            Size::new(FIGURE_SIZE.0, FIGURE_SIZE.1),
        );
        let mut scene = Scene::new(canvas);

        self.title(&mut scene)?;
        self.pipeline(&mut scene)?;
        self.services(&mut scene)?;
        self.environment_panel(&mut scene)?;
        self.steps_panel(&mut scene)?;

        scene.push(
            self.text("🚀 Ready for Production Deployment", 5.0, 0.05, 10.0)
                .centered()
                .bold()
                .with_color(Color::new(ACCENT)?),
        );

        Ok(scene)
    }

    fn text(&self, content: &str, x: f32, y: f32, size: f32) -> TextBlock {
        TextBlock::new(content, Point::new(x, y))
            .with_font_size(size)
            .with_font_family(self.font_family)
    }

    fn node(
        &self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        border: &str,
        fill: &str,
    ) -> Result<Node, ColorError> {
        Ok(Node::new(
            Point::new(x, y),
            Size::new(width, height),
            Color::new(border)?,
            Color::new(fill)?,
        ))
    }

    fn title(&self, scene: &mut Scene) -> Result<(), ColorError> {
        scene.push(
            self.text("ADORIS INVEST GROUP", 5.0, 9.5, 24.0)
                .centered()
                .bold()
                .with_color(Color::new(ACCENT)?),
        );
        scene.push(
            self.text("Vercel Deployment Architecture", 5.0, 9.0, 16.0)
                .centered()
                .with_color(Color::new(MUTED)?),
        );
        Ok(())
    }

    /// Row 1: GitHub -> Vercel -> custom domain.
    fn pipeline(&self, scene: &mut Scene) -> Result<(), ColorError> {
        scene.push(
            self.node(0.5, 7.0, 2.0, 1.0, GITHUB, "#f6f8fa")?
                .with_label(self.text("1. GitHub", 1.5, 7.7, 12.0).centered().bold())
                .with_label(
                    self.text("AIG-33/adoris-invest-group", 1.5, 7.35, 9.0)
                        .centered()
                        .italic(),
                ),
        );
        scene.push(
            self.node(3.5, 7.0, 2.0, 1.0, VERCEL, "#f0f0f0")?
                .with_label(self.text("2. Vercel", 4.5, 7.7, 12.0).centered().bold())
                .with_label(
                    self.text("Auto Deploy", 4.5, 7.35, 9.0)
                        .centered()
                        .with_color(Color::new("green")?),
                ),
        );
        scene.push(
            self.node(6.5, 7.0, 2.5, 1.0, DOMAIN, "#e3f2fd")?
                .with_label(self.text("3. Custom Domain", 7.75, 7.7, 12.0).centered().bold())
                .with_label(
                    self.text("shop.adorisgroup.com", 7.75, 7.35, 9.0)
                        .centered()
                        .with_color(Color::new(DOMAIN)?),
                ),
        );

        scene.push(
            Connector::new(
                Point::new(2.5, 7.5),
                Point::new(3.5, 7.5),
                ArrowDirection::Forward,
                StrokeDefinition::solid(Color::new(GITHUB)?, 2.0),
                20.0,
            )
            .with_label(self.text("push", 3.0, 7.7, 8.0).centered().italic()),
        );
        scene.push(
            Connector::new(
                Point::new(5.5, 7.5),
                Point::new(6.5, 7.5),
                ArrowDirection::Forward,
                StrokeDefinition::solid(Color::new(VERCEL)?, 2.0),
                20.0,
            )
            .with_label(self.text("deploy", 6.0, 7.7, 8.0).centered().italic()),
        );
        Ok(())
    }

    /// Row 2: database, email and storage, each fed from Vercel.
    fn services(&self, scene: &mut Scene) -> Result<(), ColorError> {
        let services = [
            (0.5, SUPABASE, "#e8f5e9", "Supabase PostgreSQL", "Transaction Pooler", "Port 6543"),
            (3.5, GMAIL, "#ffebee", "Gmail SMTP", "info@adorisgroup.com", "Port 587"),
            (6.5, AWS, "#fff3e0", "AWS S3 Storage", "File Uploads", "us-west-2"),
        ];

        for (x, accent, fill, name, role, detail) in services {
            let center = x + 1.25;
            scene.push(
                self.node(x, 5.0, 2.5, 1.2, accent, fill)?
                    .with_label(self.text(name, center, 5.85, 11.0).centered().bold())
                    .with_label(
                        self.text(role, center, 5.55, 9.0)
                            .centered()
                            .with_color(Color::new(accent)?),
                    )
                    .with_label(self.text(detail, center, 5.25, 8.0).centered().italic()),
            );
        }

        let links = [
            (1.75, SUPABASE, ArrowDirection::Bidirectional),
            (4.75, GMAIL, ArrowDirection::Forward),
            (7.75, AWS, ArrowDirection::Bidirectional),
        ];
        for (target_x, accent, direction) in links {
            scene.push(Connector::new(
                VERCEL_BOTTOM,
                Point::new(target_x, 6.2),
                direction,
                StrokeDefinition::dashed(Color::new(accent)?, 1.5),
                15.0,
            ));
        }
        Ok(())
    }

    fn environment_panel(&self, scene: &mut Scene) -> Result<(), ColorError> {
        scene.push(
            self.node(0.5, 2.5, 8.5, 2.0, ACCENT, "#f0f9f8")?.with_label(
                self.text("Environment Variables (Vercel Settings)", 4.75, 4.2, 12.0)
                    .centered()
                    .bold()
                    .with_color(Color::new(ACCENT)?),
            ),
        );

        for (row, var) in ENV_VARS.iter().enumerate() {
            let y = 3.7 - row as f32 * LIST_LINE_SPACING;
            scene.push(self.text(&format!("• {var}"), 0.8, y, 9.0));
        }
        Ok(())
    }

    /// Two-column steps list: column by `index / 3`, row by `index % 3`.
    fn steps_panel(&self, scene: &mut Scene) -> Result<(), ColorError> {
        scene.push(
            self.node(0.5, 0.2, 8.5, 2.0, MUTED, "#fafafa")?.with_label(
                self.text("Quick Deployment Steps", 4.75, 1.95, 12.0)
                    .centered()
                    .bold()
                    .with_color(Color::new("#333")?),
            ),
        );

        for (index, step) in STEPS.iter().enumerate() {
            let x = STEP_COLUMNS_X[index / STEPS_PER_COLUMN];
            let y = LIST_TOP_Y - (index % STEPS_PER_COLUMN) as f32 * LIST_LINE_SPACING;
            scene.push(self.text(step, x, y, 8.5));
        }
        Ok(())
    }
}

use console::Style;
use mosaic_core::pipeline::config::GroupsConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_groups_summary(config: &GroupsConfig, backend: &str) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Mosaic Groups"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Data"),
        s.path.apply_to(config.data_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Backend"),
        s.method.apply_to(backend)
    );
    println!();

    println!("  {}", s.header.apply_to("Groups"));
    for (i, group) in config.groups.iter().enumerate() {
        println!(
            "    {}. {}",
            s.label.apply_to(i + 1),
            s.path.apply_to(config.group_dir(group).display())
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Stitching"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Groups"),
        s.method.apply_to(config.group_mode)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Final"),
        s.method.apply_to(config.final_mode)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Order"),
        s.value
            .apply_to(if config.sort_inputs { "sorted" } else { "directory" })
    );
    println!();

    let reg = &config.registration;
    println!("  {}", s.header.apply_to("Registration"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Overlap"),
        s.value
            .apply_to(format!("{:.0}%", reg.min_overlap_fraction * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Confidence"),
        s.value.apply_to(reg.min_confidence)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Search"),
        s.value.apply_to(format!("{} px", reg.max_search_dim))
    );
    println!();
}

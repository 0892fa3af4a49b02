//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
///
/// Everything is commented out so the file documents the defaults
/// without pinning them.
pub(crate) fn default_config_toml() -> String {
    r##"# Orrery Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Orrery"
# width = 1280           # 320-7680
# height = 800           # 240-4320
# vsync = true

[camera]
# position = [0.0, 0.0, 50.0]
# target = [0.0, 0.0, 0.0]
# fov_degrees = 75.0     # 10-120
# near = 0.1
# far = 1000.0

[bloom]
# mode = "selective"     # selective, global, off
# strength = 2.0         # 0.0-10.0
# radius = 0.1           # 0.0-1.0
# threshold = 0.1        # 0.0-1.0
# passes = 2             # 1-5

[background]
# texture = "starsmap.jpg"
# intensity = 0.5        # 0.0-1.0
# color = "#000000"

[orbit]
# orbital_speed = 0.005  # radians per millisecond, times each rate_factor
# spin_mode = "time"     # time, frame
# epoch = "start"        # start, unix
# show_markers = true
# marker_color = "#d3d3d3"
# marker_width = 0.1     # 0.01-5.0
# marker_segments = 124  # 8-512

[lighting]
# sun_color = "#ffff00"
# sun_intensity = 1000.0
# sun_range = 100.0
# ambient_color = "#ffffff"
# ambient_intensity = 1.0

[sun]
# radius = 5.0
# texture = "sunmap.jpg"
# color = "#ffcc33"
# bloom = true

[logging]
# level = "INFO"         # DEBUG, INFO, WARNING, ERROR

[assets]
# dir = "assets"          # texture paths resolve against this

# Supplying any [[bodies]] replaces the default eight planets.
# [[bodies]]
# name = "earth"
# radius = 0.7
# distance = 20.0
# rate_factor = 0.07
# spin_rate = 0.005
# texture = "earthmap.jpg"
# bump_texture = "earthbump.jpg"
# color = "#2f6ab5"
# bloom = false
"##
    .to_string()
}

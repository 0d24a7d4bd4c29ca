//! The three fixed proposal templates customized in `Fixed` mode.
//!
//! Bodies carry literal `{client_name}`, `{project_type}` and `{your_name}` markers.
//! They are plain substrings, not a template language: substitution is find-and-replace.

pub const CLIENT_NAME_PLACEHOLDER: &str = "{client_name}";
pub const PROJECT_TYPE_PLACEHOLDER: &str = "{project_type}";
pub const YOUR_NAME_PLACEHOLDER: &str = "{your_name}";

/// Signature used for `{your_name}`.
pub const YOUR_NAME: &str = "Your Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTemplate {
    pub id: u32,
    pub title: &'static str,
    pub body: &'static str,
}

pub const FIXED_TEMPLATES: [FixedTemplate; 3] = [
    FixedTemplate {
        id: 1,
        title: "Template 1 - WordPress & Elementor Expert",
        body: "Hi {client_name},

I can refine your {project_type} page to make it visually polished and fully optimized. With my expertise in WordPress and Elementor, I'll ensure it's mobile-friendly, clean, and user-focused.

I have 3+ years of experience in WordPress design and layout fixes. Here are some examples of my work:
- https://www.littlefishproperties.com.au/
- https://nectarnexusllc.com/
- https://pageloot.com/

Would you like to share your preferred layout and flow? I'd love to discuss your ideas!

Best,
{your_name}",
    },
    FixedTemplate {
        id: 2,
        title: "Template 2 - Design Consistency Specialist",
        body: "Hi {client_name},

I've reviewed your description and I'm confident I can update your webpages to match the new homepage design using WordPress and Elementor.

Here are some sites I recently built with Elementor:
- https://kidcityacademy.net
- https://mstssolutions.com

I'm available to start immediately and ensure your site looks consistent and professional.

Cheers,
{your_name}",
    },
    FixedTemplate {
        id: 3,
        title: "Template 3 - Technical Setup Expert",
        body: "Hi {client_name},

I can help you install the SSL certificate and connect Google Suite to your domain name right away. I'll ensure everything is configured correctly and securely.

If you'd like, we can get started immediately.

Cheers,
{your_name}",
    },
];

//! Resume generation prompt. Output is Markdown, not JSON.

use crate::interview::prompts::TEMPERATURE;
use crate::llm_client::GenerationRequest;
use crate::resume::models::ResumeInput;

pub const RESUME_SYSTEM: &str = "You are a professional resume writer with expertise in \
    creating ATS-friendly resumes that highlight candidates' strengths and achievements.";

const RESUME_INSTRUCTIONS: &str = "\
Generate a professional resume in a clean, well-structured format. Include:
1. A compelling professional summary
2. Properly formatted work experience with bullet points highlighting achievements
3. Education details
4. Skills section organized by category
5. Use action verbs and quantify achievements where possible
6. Make it ATS-friendly with clear section headers

Format the resume in Markdown with proper headers (##) and bullet points.";

pub fn resume_request(input: &ResumeInput) -> GenerationRequest {
    let contact = &input.contact;

    let mut personal = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nLocation: {}\n",
        contact.name, contact.email, contact.phone, contact.location
    );
    if let Some(linkedin) = &contact.linkedin {
        personal.push_str(&format!("LinkedIn: {linkedin}\n"));
    }
    if let Some(website) = &contact.website {
        personal.push_str(&format!("Website: {website}\n"));
    }

    let experience = input
        .experience
        .iter()
        .enumerate()
        .map(|(i, role)| {
            format!(
                "{}. {} at {}\n   {} - {}\n   {}",
                i + 1,
                role.position,
                role.company,
                role.start_date,
                role.end_date.as_deref().unwrap_or("Present"),
                role.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let education = input
        .education
        .iter()
        .enumerate()
        .map(|(i, degree)| {
            let mut entry = format!(
                "{}. {} in {}\n   {}, {}",
                i + 1,
                degree.degree,
                degree.field,
                degree.school,
                degree.year
            );
            if let Some(gpa) = &degree.gpa {
                entry.push_str(&format!("\n   GPA: {gpa}"));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let user_prompt = format!(
        "Create a professional, ATS-friendly resume based on the following information:\n\n\
         PERSONAL INFORMATION:\n{personal}\n\
         PROFESSIONAL SUMMARY:\n{summary}\n\n\
         WORK EXPERIENCE:\n{experience}\n\n\
         EDUCATION:\n{education}\n\n\
         SKILLS:\n{skills}\n\n\
         {RESUME_INSTRUCTIONS}",
        summary = contact.summary.as_deref().unwrap_or("No summary provided"),
        skills = input.skills.join(", "),
    );

    GenerationRequest {
        system_instruction: RESUME_SYSTEM.to_string(),
        user_prompt,
        temperature: TEMPERATURE,
        max_output_size: None,
    }
}
